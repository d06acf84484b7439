use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{JobPoll, TranscriptionBackend, TranscriptionBackendError};
use crate::domain::TranscriptionJobStatus;

/// Scripted backend for orchestrator and pipeline tests: replays a fixed
/// sequence of poll results, then repeats the last one.
pub struct MockTranscriptionBackend {
    polls: Mutex<VecDeque<JobPoll>>,
    last: Mutex<Option<JobPoll>>,
    transcript: String,
    start_calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl MockTranscriptionBackend {
    pub fn with_polls(polls: Vec<JobPoll>, transcript: &str) -> Self {
        Self {
            polls: Mutex::new(polls.into()),
            last: Mutex::new(None),
            transcript: transcript.to_string(),
            start_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
        }
    }

    /// A backend whose job never leaves IN_PROGRESS.
    pub fn never_completing() -> Self {
        Self::with_polls(
            vec![JobPoll {
                status: TranscriptionJobStatus::InProgress,
                failure_reason: None,
                transcript_uri: None,
            }],
            "",
        )
    }

    /// A backend completing on the first poll.
    pub fn completing_with(transcript: &str) -> Self {
        Self::with_polls(
            vec![JobPoll {
                status: TranscriptionJobStatus::Completed,
                failure_reason: None,
                transcript_uri: Some("mem://transcripts/result.json".to_string()),
            }],
            transcript,
        )
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptionBackend for MockTranscriptionBackend {
    async fn start_job(
        &self,
        _job_name: &str,
        _language_code: &str,
        _media_format: &str,
        _media_uri: &str,
    ) -> Result<(), TranscriptionBackendError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn job_status(&self, _job_name: &str) -> Result<JobPoll, TranscriptionBackendError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let mut polls = self.polls.lock().unwrap_or_else(|p| p.into_inner());
        let mut last = self.last.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(poll) = polls.pop_front() {
            *last = Some(poll.clone());
            return Ok(poll);
        }
        last.clone().ok_or_else(|| {
            TranscriptionBackendError::ApiRequestFailed("no scripted polls".to_string())
        })
    }

    async fn fetch_transcript(
        &self,
        _transcript_uri: &str,
    ) -> Result<String, TranscriptionBackendError> {
        Ok(self.transcript.clone())
    }
}
