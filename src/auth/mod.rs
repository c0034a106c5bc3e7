//! API key handling and credential sources.

use crate::errors::{SendGridError, SendGridErrorKind, SendGridResult};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "SENDGRID_API_KEY";

/// SendGrid API key credentials.
#[derive(Debug, Clone)]
pub struct Credentials(SecretString);

impl Credentials {
    /// Wraps a raw API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::new(key.into()))
    }

    /// Returns true if the key is empty.
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().trim().is_empty()
    }

    /// Gets a masked prefix for logging.
    pub fn masked(&self) -> &'static str {
        if self.0.expose_secret().starts_with("SG.") {
            "SG.***"
        } else {
            "***"
        }
    }

    /// Generates the Authorization header value.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

/// Source of the API key, consulted before every request.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Gets the API key.
    async fn api_key(&self) -> SendGridResult<Credentials>;
}

/// Static credential provider using a fixed key.
pub struct StaticCredentialProvider {
    key: Credentials,
}

impl StaticCredentialProvider {
    /// Creates a new static credential provider.
    pub fn new(key: Credentials) -> Self {
        Self { key }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn api_key(&self) -> SendGridResult<Credentials> {
        Ok(self.key.clone())
    }
}

/// Environment variable credential provider.
pub struct EnvCredentialProvider {
    var_name: String,
}

impl EnvCredentialProvider {
    /// Creates a provider reading `SENDGRID_API_KEY`.
    pub fn new() -> Self {
        Self::from_env_var(API_KEY_ENV_VAR)
    }

    /// Creates a provider from a custom environment variable.
    pub fn from_env_var(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }

    /// Reads the key synchronously.
    pub fn read(&self) -> SendGridResult<Credentials> {
        match std::env::var(&self.var_name) {
            Ok(value) if !value.trim().is_empty() => Ok(Credentials::new(value)),
            _ => Err(SendGridError::new(
                SendGridErrorKind::MissingAuth,
                format!("Environment variable {} not set", self.var_name),
            )),
        }
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn api_key(&self) -> SendGridResult<Credentials> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let key = Credentials::new("SG.test");
        assert_eq!(key.bearer_header(), "Bearer SG.test");
        assert_eq!(key.masked(), "SG.***");
    }

    #[test]
    fn test_debug_does_not_leak() {
        let key = Credentials::new("SG.secret-value");
        assert!(!format!("{:?}", key).contains("secret-value"));
    }

    #[tokio::test]
    async fn test_env_provider_missing_var() {
        let provider = EnvCredentialProvider::from_env_var("SENDGRID_TEST_KEY_THAT_IS_NEVER_SET");
        let err = provider.api_key().await.unwrap_err();
        assert_eq!(*err.kind(), SendGridErrorKind::MissingAuth);
    }

    #[tokio::test]
    async fn test_static_credential_provider() {
        let provider = StaticCredentialProvider::new(Credentials::new("SG.static"));
        let key = provider.api_key().await.unwrap();
        assert!(!key.is_empty());
    }
}
