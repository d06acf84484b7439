use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{JobPoll, TranscriptionBackend, TranscriptionBackendError};
use crate::domain::TranscriptionJobStatus;

/// REST client for the asynchronous transcription service: POST to start a
/// job, GET for status, GET for the transcript document.
pub struct HttpTranscriptionBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranscriptionBackend {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Serialize)]
struct StartJobRequest<'a> {
    job_name: &'a str,
    language_code: &'a str,
    media_format: &'a str,
    media_uri: &'a str,
}

#[derive(Deserialize)]
struct JobStatusResponse {
    status: String,
    failure_reason: Option<String>,
    transcript_uri: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptDocument {
    results: TranscriptResults,
}

#[derive(Deserialize)]
struct TranscriptResults {
    #[serde(default)]
    transcripts: Vec<TranscriptPassage>,
}

#[derive(Deserialize)]
struct TranscriptPassage {
    transcript: String,
}

#[async_trait]
impl TranscriptionBackend for HttpTranscriptionBackend {
    async fn start_job(
        &self,
        job_name: &str,
        language_code: &str,
        media_format: &str,
        media_uri: &str,
    ) -> Result<(), TranscriptionBackendError> {
        let url = format!("{}/jobs", self.endpoint);
        tracing::debug!(job = %job_name, media_uri = %media_uri, "Starting transcription job");

        let response = self
            .client
            .post(&url)
            .json(&StartJobRequest {
                job_name,
                language_code,
                media_format,
                media_uri,
            })
            .send()
            .await
            .map_err(|e| TranscriptionBackendError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionBackendError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }
        Ok(())
    }

    async fn job_status(&self, job_name: &str) -> Result<JobPoll, TranscriptionBackendError> {
        let url = format!("{}/jobs/{}", self.endpoint, job_name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TranscriptionBackendError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(TranscriptionBackendError::ApiRequestFailed(format!(
                "status {}",
                response.status()
            )));
        }

        let parsed: JobStatusResponse = response.json().await.map_err(|e| {
            TranscriptionBackendError::ApiRequestFailed(format!("parse response: {}", e))
        })?;

        let status = TranscriptionJobStatus::from_str(&parsed.status)
            .map_err(TranscriptionBackendError::MalformedResult)?;

        Ok(JobPoll {
            status,
            failure_reason: parsed.failure_reason,
            transcript_uri: parsed.transcript_uri,
        })
    }

    async fn fetch_transcript(
        &self,
        transcript_uri: &str,
    ) -> Result<String, TranscriptionBackendError> {
        let response = self
            .client
            .get(transcript_uri)
            .send()
            .await
            .map_err(|e| TranscriptionBackendError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(TranscriptionBackendError::ApiRequestFailed(format!(
                "status {}",
                response.status()
            )));
        }

        let document: TranscriptDocument = response.json().await.map_err(|e| {
            TranscriptionBackendError::MalformedResult(format!("parse transcript: {}", e))
        })?;

        document
            .results
            .transcripts
            .into_iter()
            .next()
            .map(|p| p.transcript)
            .ok_or_else(|| {
                TranscriptionBackendError::MalformedResult("empty transcripts array".to_string())
            })
    }
}
