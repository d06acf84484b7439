use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::ports::{ObjectUploader, ScopedArtifact, UploadError};
use crate::domain::RemoteObjectHandle;

/// Test double minting a fixed handle or failing on demand.
pub struct MockObjectUploader {
    handle_uri: String,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockObjectUploader {
    pub fn returning(handle_uri: &str) -> Self {
        Self {
            handle_uri: handle_uri.to_string(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            handle_uri: String::new(),
            failure: Some(detail.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectUploader for MockObjectUploader {
    async fn upload(&self, _artifact: &ScopedArtifact) -> Result<RemoteObjectHandle, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(detail) => Err(UploadError::UploadFailed(detail.clone())),
            None => Ok(RemoteObjectHandle::new(self.handle_uri.clone())),
        }
    }
}
