use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::ports::{FetchedMedia, MediaCredentials, MediaFetchError, MediaFetcher};

/// Test double returning fixed bytes or a scripted transport failure.
pub struct MockMediaFetcher {
    bytes: Vec<u8>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockMediaFetcher {
    pub fn returning(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            bytes: Vec::new(),
            failure: Some(detail.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaFetcher for MockMediaFetcher {
    async fn fetch(
        &self,
        _url: &str,
        _credentials: &MediaCredentials,
    ) -> Result<FetchedMedia, MediaFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(detail) => Err(MediaFetchError::Transport(detail.clone())),
            None => Ok(FetchedMedia {
                status: 200,
                bytes: self.bytes.clone(),
            }),
        }
    }
}
