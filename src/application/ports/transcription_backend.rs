use async_trait::async_trait;

use crate::domain::TranscriptionJobStatus;

/// Snapshot of a job as reported by one status poll.
#[derive(Debug, Clone)]
pub struct JobPoll {
    pub status: TranscriptionJobStatus,
    pub failure_reason: Option<String>,
    pub transcript_uri: Option<String>,
}

/// The asynchronous transcription service behind the orchestrator.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    async fn start_job(
        &self,
        job_name: &str,
        language_code: &str,
        media_format: &str,
        media_uri: &str,
    ) -> Result<(), TranscriptionBackendError>;

    async fn job_status(&self, job_name: &str) -> Result<JobPoll, TranscriptionBackendError>;

    /// Fetch the transcript document and extract the passage text.
    async fn fetch_transcript(
        &self,
        transcript_uri: &str,
    ) -> Result<String, TranscriptionBackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionBackendError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("malformed result: {0}")]
    MalformedResult(String),
}
