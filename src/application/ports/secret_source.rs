use async_trait::async_trait;

/// Underlying secret store. Implementations fetch the raw secret string;
/// unwrapping keyed documents is the credential cache's concern.
#[async_trait]
pub trait SecretSource: Send + Sync {
    async fn fetch_secret(&self, name: &str) -> Result<String, SecretError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("secret {0} unavailable: {1}")]
    Unavailable(String, String),
    #[error("secret {0} has no field {1}")]
    MissingField(String, String),
}
