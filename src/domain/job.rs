use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::TranscriptionJobStatus;

/// One asynchronous transcription job, created at submission and mutated only
/// by the polling loop until it reaches a terminal status.
#[derive(Debug, Clone)]
pub struct TranscriptionJob {
    pub name: String,
    pub status: TranscriptionJobStatus,
    pub attempts: u32,
    pub transcript_uri: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TranscriptionJob {
    pub fn new() -> Self {
        Self {
            name: format!("job-{}", Uuid::new_v4()),
            status: TranscriptionJobStatus::Submitted,
            attempts: 0,
            transcript_uri: None,
            failure_reason: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl Default for TranscriptionJob {
    fn default() -> Self {
        Self::new()
    }
}
