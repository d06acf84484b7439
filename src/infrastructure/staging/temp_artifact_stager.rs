use std::io::{self, Write};
use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::{ArtifactStager, ScopedArtifact, StagingError};

/// Stages raw media bytes in a uniquely named temp file. The returned
/// artifact owns a `TempPath`, so the file is deleted when the artifact is
/// dropped, wherever the pipeline exits.
pub struct TempArtifactStager {
    dir: Option<PathBuf>,
}

impl TempArtifactStager {
    /// Stage under the system temp directory.
    pub fn new() -> Self {
        Self { dir: None }
    }

    /// Stage under a caller-chosen directory. Used by tests to assert that
    /// nothing is left behind.
    pub fn in_dir(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }
}

impl Default for TempArtifactStager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactStager for TempArtifactStager {
    async fn stage(&self, bytes: &[u8]) -> Result<ScopedArtifact, StagingError> {
        let bytes = bytes.to_vec();
        let dir = self.dir.clone();

        // tempfile is synchronous; keep the write off the reactor.
        let artifact = tokio::task::spawn_blocking(move || -> Result<ScopedArtifact, StagingError> {
            let mut builder = tempfile::Builder::new();
            builder.prefix("voxrelay-").suffix(".media");
            let mut file = match &dir {
                Some(dir) => builder.tempfile_in(dir)?,
                None => builder.tempfile()?,
            };
            file.write_all(&bytes)?;
            file.flush()?;
            let len = bytes.len() as u64;
            Ok(ScopedArtifact::new(file.into_temp_path(), len))
        })
        .await
        .map_err(|e| StagingError::Io(io::Error::other(e)))??;

        tracing::debug!(
            path = %artifact.path().display(),
            bytes = artifact.len(),
            "Media artifact staged"
        );
        Ok(artifact)
    }
}
