use altscribe_core::{GeneratedDescription, SignedAccessUrl};
use anyhow::Result;
use async_trait::async_trait;

/// Produces an alt-text description for one image.
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    /// Describe the image behind `image_url`.
    ///
    /// The returned `url` is the canonical (unsigned) address of the image.
    /// Errors are not retried here.
    async fn describe(&self, image_url: &SignedAccessUrl) -> Result<GeneratedDescription>;
}
