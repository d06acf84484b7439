use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    Clock, TranscriptionBackend, TranscriptionBackendError,
};
use crate::domain::{
    PipelineStage, PipelineTrace, RemoteObjectHandle, TranscriptionJob, TranscriptionJobStatus,
};

/// Submits a transcription job and polls it to a terminal state.
///
/// The poll budget (interval x attempts) is provisioned to fit inside the
/// caller's outer request deadline; the deadline cancels an in-flight sleep
/// through the cancellation token.
pub struct TranscriptionOrchestrator {
    backend: Arc<dyn TranscriptionBackend>,
    clock: Arc<dyn Clock>,
    language_code: String,
    media_format: String,
    poll_interval: Duration,
    max_attempts: u32,
}

impl TranscriptionOrchestrator {
    pub fn new(
        backend: Arc<dyn TranscriptionBackend>,
        clock: Arc<dyn Clock>,
        language_code: String,
        media_format: String,
        poll_interval: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            backend,
            clock,
            language_code,
            media_format,
            poll_interval,
            max_attempts,
        }
    }

    pub async fn transcribe(
        &self,
        source: &RemoteObjectHandle,
        cancel: &CancellationToken,
        trace: &mut PipelineTrace,
    ) -> Result<String, TranscriptionError> {
        let mut job = TranscriptionJob::new();

        self.backend
            .start_job(
                &job.name,
                &self.language_code,
                &self.media_format,
                source.as_str(),
            )
            .await
            .map_err(TranscriptionError::Backend)?;
        tracing::info!(job = %job.name, source = %source, "Transcription job submitted");

        while job.attempts < self.max_attempts {
            tokio::select! {
                _ = cancel.cancelled() => {
                    trace.error(PipelineStage::Transcribe, "interrupted during poll sleep");
                    tracing::warn!(job = %job.name, "Transcription poll interrupted by deadline");
                    return Err(TranscriptionError::Interrupted);
                }
                _ = self.clock.sleep(self.poll_interval) => {}
            }
            job.attempts += 1;

            let poll = self
                .backend
                .job_status(&job.name)
                .await
                .map_err(TranscriptionError::Backend)?;
            job.status = poll.status;
            trace.ok(
                PipelineStage::Transcribe,
                format!("poll {} of {}: {}", job.attempts, self.max_attempts, poll.status),
            );
            tracing::debug!(
                job = %job.name,
                attempt = job.attempts,
                status = %poll.status,
                "Transcription job polled"
            );

            match poll.status {
                TranscriptionJobStatus::Completed => {
                    job.transcript_uri = poll.transcript_uri;
                    let uri = job.transcript_uri.as_deref().ok_or_else(|| {
                        TranscriptionError::MalformedResult(
                            "completed job reported no transcript uri".to_string(),
                        )
                    })?;
                    let text = self.backend.fetch_transcript(uri).await.map_err(|e| match e {
                        TranscriptionBackendError::MalformedResult(detail) => {
                            TranscriptionError::MalformedResult(detail)
                        }
                        other => TranscriptionError::Backend(other),
                    })?;
                    tracing::info!(job = %job.name, chars = text.len(), "Transcription completed");
                    return Ok(text);
                }
                TranscriptionJobStatus::Failed => {
                    job.failure_reason = poll.failure_reason;
                    let reason = job
                        .failure_reason
                        .clone()
                        .unwrap_or_else(|| "unspecified".to_string());
                    tracing::error!(job = %job.name, reason = %reason, "Transcription job failed");
                    return Err(TranscriptionError::JobFailed(reason));
                }
                _ => continue,
            }
        }

        job.status = TranscriptionJobStatus::TimedOut;
        tracing::error!(
            job = %job.name,
            attempts = job.attempts,
            "Transcription job timed out"
        );
        Err(TranscriptionError::TimedOut(job.attempts))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("backend: {0}")]
    Backend(TranscriptionBackendError),
    #[error("job failed: {0}")]
    JobFailed(String),
    #[error("timed out after {0} poll attempts")]
    TimedOut(u32),
    #[error("interrupted")]
    Interrupted,
    #[error("malformed result: {0}")]
    MalformedResult(String),
}
