use std::path::Path;

use async_trait::async_trait;
use tempfile::TempPath;

/// A staged local copy of the downloaded media. The backing file is deleted
/// when the artifact is dropped, on every exit path of the pipeline.
#[derive(Debug)]
pub struct ScopedArtifact {
    path: TempPath,
    len: u64,
}

impl ScopedArtifact {
    pub fn new(path: TempPath, len: u64) -> Self {
        Self { path, len }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[async_trait]
pub trait ArtifactStager: Send + Sync {
    /// Write `bytes` to a uniquely named temporary resource. No partial
    /// artifact is left behind on failure.
    async fn stage(&self, bytes: &[u8]) -> Result<ScopedArtifact, StagingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
