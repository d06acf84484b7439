use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    ArtifactStager, MediaCredentials, MediaFetchError, MediaFetcher, ObjectUploader, StagingError,
    UploadError,
};
use crate::application::services::{
    CompletionService, CredentialCache, TranscriptionError, TranscriptionOrchestrator,
};
use crate::domain::{IncomingMessage, PipelineStage, PipelineTrace};

/// Fixed user-facing reply for any audio stage failure.
pub const AUDIO_FAILURE_REPLY: &str = "Sorry, I could not process the audio message.";

/// Result of one pipeline invocation. `degraded` marks the fixed failure
/// reply; the trace is always retained for diagnostics.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub reply: String,
    pub trace: PipelineTrace,
    pub degraded: bool,
}

/// Composition root of the audio path: fetch, stage, upload, transcribe,
/// complete. Stages run strictly sequentially; the first failure aborts the
/// remaining stages, while the staged artifact is released on every path.
pub struct AudioPipeline {
    credentials: Arc<CredentialCache>,
    fetcher: Arc<dyn MediaFetcher>,
    stager: Arc<dyn ArtifactStager>,
    uploader: Arc<dyn ObjectUploader>,
    orchestrator: Arc<TranscriptionOrchestrator>,
    completion: Arc<CompletionService>,
    media_secret_name: String,
    media_username_field: String,
    media_password_field: String,
}

impl AudioPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        credentials: Arc<CredentialCache>,
        fetcher: Arc<dyn MediaFetcher>,
        stager: Arc<dyn ArtifactStager>,
        uploader: Arc<dyn ObjectUploader>,
        orchestrator: Arc<TranscriptionOrchestrator>,
        completion: Arc<CompletionService>,
        media_secret_name: String,
        media_username_field: String,
        media_password_field: String,
    ) -> Self {
        Self {
            credentials,
            fetcher,
            stager,
            uploader,
            orchestrator,
            completion,
            media_secret_name,
            media_username_field,
            media_password_field,
        }
    }

    pub async fn process(
        &self,
        message: &IncomingMessage,
        api_key: &str,
        cancel: &CancellationToken,
    ) -> PipelineOutcome {
        let mut trace = PipelineTrace::new();
        match self.run_stages(message, api_key, cancel, &mut trace).await {
            Ok(reply) => PipelineOutcome {
                reply,
                trace,
                degraded: false,
            },
            Err(e) => {
                tracing::error!(error = %e, trace = %trace.render(), "Audio pipeline failed");
                PipelineOutcome {
                    reply: AUDIO_FAILURE_REPLY.to_string(),
                    trace,
                    degraded: true,
                }
            }
        }
    }

    async fn run_stages(
        &self,
        message: &IncomingMessage,
        api_key: &str,
        cancel: &CancellationToken,
        trace: &mut PipelineTrace,
    ) -> Result<String, PipelineError> {
        let media_url = message.media_url.as_deref().ok_or(PipelineError::NoMedia)?;

        let credentials = self.media_credentials().await.map_err(|e| {
            trace.error(PipelineStage::Fetch, e.to_string());
            PipelineError::Fetch(e)
        })?;

        let media = self
            .fetcher
            .fetch(media_url, &credentials)
            .await
            .map_err(|e| {
                trace.error(PipelineStage::Fetch, e.to_string());
                PipelineError::Fetch(e)
            })?;
        trace.ok(
            PipelineStage::Fetch,
            format!("status {}, {} bytes", media.status, media.bytes.len()),
        );

        let artifact = self.stager.stage(&media.bytes).await.map_err(|e| {
            trace.error(PipelineStage::Stage, e.to_string());
            PipelineError::Staging(e)
        })?;
        trace.ok(
            PipelineStage::Stage,
            format!("{} bytes at {}", artifact.len(), artifact.path().display()),
        );

        let handle = self.uploader.upload(&artifact).await.map_err(|e| {
            trace.error(PipelineStage::Upload, e.to_string());
            PipelineError::Upload(e)
        })?;
        trace.ok(PipelineStage::Upload, handle.to_string());
        // The object is durable now; release the staged file before polling.
        drop(artifact);

        let transcript = self
            .orchestrator
            .transcribe(&handle, cancel, trace)
            .await
            .map_err(|e| {
                trace.error(PipelineStage::Transcribe, e.to_string());
                PipelineError::Transcription(e)
            })?;
        trace.ok(
            PipelineStage::Transcribe,
            format!("transcript {} chars", transcript.len()),
        );

        // The completion stage degrades to fallback text internally and
        // never fails the pipeline.
        let reply = self.completion.complete(&transcript, api_key).await;
        trace.ok(PipelineStage::Complete, format!("reply {} chars", reply.len()));
        Ok(reply)
    }

    async fn media_credentials(&self) -> Result<MediaCredentials, MediaFetchError> {
        let username = self
            .credentials
            .get_field(&self.media_secret_name, &self.media_username_field)
            .await
            .map_err(|e| MediaFetchError::AuthUnavailable(e.to_string()))?;
        let password = self
            .credentials
            .get_field(&self.media_secret_name, &self.media_password_field)
            .await
            .map_err(|e| MediaFetchError::AuthUnavailable(e.to_string()))?;
        Ok(MediaCredentials { username, password })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("message carries no media url")]
    NoMedia,
    #[error("fetch: {0}")]
    Fetch(MediaFetchError),
    #[error("staging: {0}")]
    Staging(StagingError),
    #[error("upload: {0}")]
    Upload(UploadError),
    #[error("transcription: {0}")]
    Transcription(TranscriptionError),
}
