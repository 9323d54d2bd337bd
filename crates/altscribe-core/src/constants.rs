//! Fixed values of the ingest pipeline. These are not configurable.

use std::time::Duration;

/// File extensions eligible for description generation (lowercase, with dot).
pub const ALLOWED_EXTENSIONS: [&str; 7] = [".png", ".jpeg", ".jpg", ".tiff", ".gif", ".bmp", ".webp"];

/// Container holding the uploaded product images.
pub const DEFAULT_IMAGES_CONTAINER: &str = "images-description";

/// Lifetime of the signed read URL handed to the model.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(60 * 60);

pub const DEFAULT_COSMOS_DATABASE: &str = "descriptions";
pub const DEFAULT_COSMOS_CONTAINER: &str = "products_descriptions";

pub const DEFAULT_OPENAI_DEPLOYMENT: &str = "image-bot";
pub const DEFAULT_OPENAI_API_VERSION: &str = "2024-02-15-preview";

/// Output budget of a single alt-text completion.
pub const DESCRIPTION_MAX_TOKENS: u32 = 300;

/// Name of the function the host invokes for blob uploads.
pub const DEFAULT_FUNCTION_NAME: &str = "descriptions_trigger";
