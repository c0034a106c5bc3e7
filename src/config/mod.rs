//! Configuration types for the SendGrid client.

use crate::auth::{Credentials, EnvCredentialProvider};
use crate::errors::{SendGridError, SendGridErrorKind};
use std::time::Duration;

/// Default SendGrid API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com/v3";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for a whole create/read/update/delete operation, retries included.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(20 * 60);

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = concat!("integrations-sendgrid/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV_VAR: &str = "SENDGRID_BASE_URL";

/// Environment variable naming the subuser to act on behalf of.
pub const ON_BEHALF_OF_ENV_VAR: &str = "SENDGRID_ON_BEHALF_OF";

/// Retry configuration for rate-limited requests.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Initial backoff delay.
    pub initial_backoff: Duration,
    /// Maximum backoff delay.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
    /// Enable retries.
    pub enabled: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            multiplier: 2.0,
            enabled: true,
        }
    }
}

/// Lifecycle operation a timeout applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Resource creation.
    Create,
    /// Resource read.
    Read,
    /// Resource update.
    Update,
    /// Resource deletion.
    Delete,
}

/// Per-operation timeouts bounding the retry loop.
#[derive(Debug, Clone)]
pub struct OperationTimeouts {
    /// Create timeout.
    pub create: Duration,
    /// Read timeout.
    pub read: Duration,
    /// Update timeout.
    pub update: Duration,
    /// Delete timeout.
    pub delete: Duration,
}

impl OperationTimeouts {
    /// Uses the same timeout for every operation.
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            create: timeout,
            read: timeout,
            update: timeout,
            delete: timeout,
        }
    }

    /// Gets the timeout for an operation.
    pub fn for_operation(&self, operation: Operation) -> Duration {
        match operation {
            Operation::Create => self.create,
            Operation::Read => self.read,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }
}

impl Default for OperationTimeouts {
    fn default() -> Self {
        Self::uniform(DEFAULT_OPERATION_TIMEOUT)
    }
}

/// SendGrid client configuration.
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    /// API base URL.
    pub base_url: String,
    /// API key.
    pub api_key: Option<Credentials>,
    /// Subuser to act on behalf of.
    pub on_behalf_of: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
    /// Retry configuration.
    pub retry: RetryConfig,
    /// Operation timeouts.
    pub operation_timeouts: OperationTimeouts,
}

impl Default for SendGridConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            on_behalf_of: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryConfig::default(),
            operation_timeouts: OperationTimeouts::default(),
        }
    }
}

impl SendGridConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> SendGridConfigBuilder {
        SendGridConfigBuilder::new()
    }

    /// Builds a configuration from `SENDGRID_API_KEY`, `SENDGRID_BASE_URL`
    /// and `SENDGRID_ON_BEHALF_OF`.
    pub fn from_env() -> Result<Self, SendGridError> {
        let mut builder = Self::builder().api_key(EnvCredentialProvider::new().read()?);

        if let Some(url) = non_empty_env(BASE_URL_ENV_VAR) {
            builder = builder.base_url(url);
        }
        if let Some(subuser) = non_empty_env(ON_BEHALF_OF_ENV_VAR) {
            builder = builder.on_behalf_of(subuser);
        }

        builder.build()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SendGridError> {
        if self.base_url.is_empty() {
            return Err(SendGridError::configuration("Base URL cannot be empty"));
        }

        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            SendGridError::configuration(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(SendGridError::configuration(
                "Base URL must start with http:// or https://",
            ));
        }

        if self.user_agent.is_empty() {
            return Err(SendGridError::configuration("User-Agent cannot be empty"));
        }

        if let Some(ref subuser) = self.on_behalf_of {
            if subuser.trim().is_empty() {
                return Err(SendGridError::configuration("on-behalf-of subuser cannot be blank"));
            }
        }

        if self.retry.multiplier < 1.0 {
            return Err(SendGridError::configuration("Retry multiplier must be at least 1.0"));
        }

        Ok(())
    }

    /// Gets the API key, failing if none was configured.
    pub fn require_api_key(&self) -> Result<&Credentials, SendGridError> {
        match self.api_key {
            Some(ref key) if !key.is_empty() => Ok(key),
            _ => Err(SendGridError::new(
                SendGridErrorKind::MissingAuth,
                "An API key is required",
            )),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Builder for SendGridConfig.
#[derive(Debug, Default)]
pub struct SendGridConfigBuilder {
    base_url: Option<String>,
    api_key: Option<Credentials>,
    on_behalf_of: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    retry: Option<RetryConfig>,
    operation_timeouts: Option<OperationTimeouts>,
}

impl SendGridConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: Credentials) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Acts on behalf of the given subuser.
    pub fn on_behalf_of(mut self, subuser: impl Into<String>) -> Self {
        self.on_behalf_of = Some(subuser.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the retry configuration.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = Some(config);
        self
    }

    /// Disables retries.
    pub fn no_retry(mut self) -> Self {
        self.retry = Some(RetryConfig {
            enabled: false,
            ..Default::default()
        });
        self
    }

    /// Sets the operation timeouts.
    pub fn operation_timeouts(mut self, timeouts: OperationTimeouts) -> Self {
        self.operation_timeouts = Some(timeouts);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Result<SendGridConfig, SendGridError> {
        let config = SendGridConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: self.api_key,
            on_behalf_of: self.on_behalf_of,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            retry: self.retry.unwrap_or_default(),
            operation_timeouts: self.operation_timeouts.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SendGridConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_key.is_none());
        assert!(config.on_behalf_of.is_none());
        assert_eq!(
            config.operation_timeouts.for_operation(Operation::Delete),
            DEFAULT_OPERATION_TIMEOUT
        );
    }

    #[test]
    fn test_config_builder() {
        let config = SendGridConfig::builder()
            .base_url("http://localhost:8080/v3")
            .api_key(Credentials::new("SG.test"))
            .on_behalf_of("subuser-a")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/v3");
        assert_eq!(config.on_behalf_of.as_deref(), Some("subuser-a"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.require_api_key().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(SendGridConfig::builder().base_url("invalid-url").build().is_err());
        assert!(SendGridConfig::builder().base_url("ftp://example.com").build().is_err());
    }

    #[test]
    fn test_blank_on_behalf_of_rejected() {
        assert!(SendGridConfig::builder().on_behalf_of("  ").build().is_err());
    }

    #[test]
    fn test_missing_api_key() {
        let config = SendGridConfig::default();
        let err = config.require_api_key().unwrap_err();
        assert_eq!(*err.kind(), SendGridErrorKind::MissingAuth);
    }

    #[test]
    fn test_operation_timeouts() {
        let timeouts = OperationTimeouts {
            create: Duration::from_secs(1),
            ..OperationTimeouts::uniform(Duration::from_secs(9))
        };
        assert_eq!(timeouts.for_operation(Operation::Create), Duration::from_secs(1));
        assert_eq!(timeouts.for_operation(Operation::Read), Duration::from_secs(9));
    }
}
