use async_trait::async_trait;

/// Credential pair for Basic authentication against the media host.
#[derive(Debug, Clone)]
pub struct MediaCredentials {
    pub username: String,
    pub password: String,
}

/// Raw download result. The pipeline records status and byte count into the
/// invocation trace.
#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub status: u16,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        credentials: &MediaCredentials,
    ) -> Result<FetchedMedia, MediaFetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaFetchError {
    #[error("media credentials unavailable: {0}")]
    AuthUnavailable(String),
    #[error("transport: {0}")]
    Transport(String),
}
