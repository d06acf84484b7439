use std::fmt;

/// Opaque URI of an object in durable storage. Produced by the uploader,
/// consumed only by the transcription orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObjectHandle(String);

impl RemoteObjectHandle {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
