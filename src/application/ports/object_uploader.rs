use async_trait::async_trait;

use crate::domain::RemoteObjectHandle;

use super::ScopedArtifact;

#[async_trait]
pub trait ObjectUploader: Send + Sync {
    /// Move the staged artifact into durable object storage under a
    /// globally-unique key. No retry on failure.
    async fn upload(&self, artifact: &ScopedArtifact) -> Result<RemoteObjectHandle, UploadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("read artifact: {0}")]
    Read(#[from] std::io::Error),
    #[error("upload failed: {0}")]
    UploadFailed(String),
}
