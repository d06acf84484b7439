mod env_secret_source;
mod mock_secret_source;

pub use env_secret_source::EnvSecretSource;
pub use mock_secret_source::MockSecretSource;
