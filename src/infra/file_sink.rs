use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::app::ports::ArtifactSinkPort;
use crate::common::error::Result;

/// Writes artifacts into a directory, replacing each file atomically
pub struct FsArtifactSink {
    dir: PathBuf,
}

impl FsArtifactSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ArtifactSinkPort for FsArtifactSink {
    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.dir.join(name);
        let staging = self.dir.join(format!(".{name}.tmp"));
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &target).await?;
        debug!("Wrote {} bytes to {}", bytes.len(), target.display());
        Ok(())
    }
}
