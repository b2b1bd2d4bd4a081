use async_trait::async_trait;

use crate::common::error::Result;

/// Source of the raw agenda feed body
#[async_trait]
pub trait FeedSourcePort: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>>;
}

/// Destination for published documents, addressed by file name
#[async_trait]
pub trait ArtifactSinkPort: Send + Sync {
    /// Replace the artifact `name` with `bytes`
    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()>;
}
