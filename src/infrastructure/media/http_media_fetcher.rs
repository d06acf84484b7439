use async_trait::async_trait;

use crate::application::ports::{FetchedMedia, MediaCredentials, MediaFetchError, MediaFetcher};

/// Downloads media over plain HTTP GET with Basic authentication.
pub struct HttpMediaFetcher {
    client: reqwest::Client,
}

impl HttpMediaFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MediaFetcher for HttpMediaFetcher {
    async fn fetch(
        &self,
        url: &str,
        credentials: &MediaCredentials,
    ) -> Result<FetchedMedia, MediaFetchError> {
        tracing::debug!(url = %url, "Downloading media attachment");

        let response = self
            .client
            .get(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()
            .await
            .map_err(|e| MediaFetchError::Transport(format!("request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediaFetchError::Transport(format!("status {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MediaFetchError::Transport(format!("read body: {}", e)))?;

        tracing::info!(
            status = status.as_u16(),
            bytes = bytes.len(),
            "Media downloaded"
        );

        Ok(FetchedMedia {
            status: status.as_u16(),
            bytes: bytes.to_vec(),
        })
    }
}
