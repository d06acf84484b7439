use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use uuid::Uuid;

use crate::application::ports::{ObjectUploader, ScopedArtifact, UploadError};
use crate::domain::RemoteObjectHandle;

/// Uploads the staged artifact into durable object storage under a
/// uuid-keyed path. Written against `dyn ObjectStore` so production uses S3
/// and tests use an in-memory or local store.
pub struct ObjectStoreUploader {
    store: Arc<dyn ObjectStore>,
    bucket_uri: String,
    key_prefix: String,
    extension: String,
}

impl ObjectStoreUploader {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        bucket_uri: String,
        key_prefix: String,
        extension: String,
    ) -> Self {
        Self {
            store,
            bucket_uri,
            key_prefix,
            extension,
        }
    }
}

#[async_trait]
impl ObjectUploader for ObjectStoreUploader {
    async fn upload(&self, artifact: &ScopedArtifact) -> Result<RemoteObjectHandle, UploadError> {
        let key = format!(
            "{}/{}.{}",
            self.key_prefix.trim_matches('/'),
            Uuid::new_v4(),
            self.extension
        );

        let data = tokio::fs::read(artifact.path()).await?;
        let payload = PutPayload::from(Bytes::from(data));

        self.store
            .put(&StorePath::from(key.clone()), payload)
            .await
            .map_err(|e| UploadError::UploadFailed(e.to_string()))?;

        let uri = format!("{}/{}", self.bucket_uri.trim_end_matches('/'), key);
        tracing::info!(uri = %uri, bytes = artifact.len(), "Artifact uploaded to durable storage");
        Ok(RemoteObjectHandle::new(uri))
    }
}
