pub mod description;
pub mod event;
pub mod outcome;

pub use description::{DescriptionRecord, GeneratedDescription, SignedAccessUrl};
pub use event::IngestEvent;
pub use outcome::IngestOutcome;
