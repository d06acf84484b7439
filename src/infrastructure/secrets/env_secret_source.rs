use async_trait::async_trait;

use crate::application::ports::{SecretError, SecretSource};

/// Resolves secrets from environment variables, `{prefix}{NAME}` per secret
/// name. Deployment wires the real secret store into the environment.
pub struct EnvSecretSource {
    prefix: String,
}

impl EnvSecretSource {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn var_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, to_screaming_snake(name))
    }
}

#[async_trait]
impl SecretSource for EnvSecretSource {
    async fn fetch_secret(&self, name: &str) -> Result<String, SecretError> {
        let var = self.var_name(name);
        std::env::var(&var).map_err(|_| {
            SecretError::Unavailable(name.to_string(), format!("{} not set", var))
        })
    }
}

fn to_screaming_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}
