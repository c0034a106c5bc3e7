//! Error types for the SendGrid client.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type alias for SendGrid operations.
pub type SendGridResult<T> = Result<T, SendGridError>;

/// Error kinds for categorizing SendGrid errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendGridErrorKind {
    // Configuration errors
    /// Missing API key.
    MissingAuth,
    /// Invalid configuration.
    InvalidConfiguration,

    // Precondition errors
    /// A required field was empty.
    MissingField,
    /// Scopes that cannot be assigned.
    InvalidScopes,
    /// An identifier that cannot be used as a path segment.
    InvalidIdentifier,

    // Transport errors
    /// Request body could not be serialized.
    Serialization,
    /// Connection failed.
    ConnectionFailed,
    /// Single request timed out.
    Timeout,

    // API errors
    /// Rate limit exceeded (429).
    RateLimited,
    /// Bad request (400).
    BadRequest,
    /// Invalid or revoked API key (401).
    Unauthorized,
    /// API key lacks the required scope (403).
    Forbidden,
    /// Resource not found (404).
    NotFound,
    /// Resource conflict (409).
    Conflict,
    /// Unprocessable entity (422).
    UnprocessableEntity,
    /// Server side failure (5xx).
    ServerError,

    // Retry errors
    /// Operation deadline elapsed.
    DeadlineExceeded,

    // Response errors
    /// Response body could not be decoded.
    Deserialization,

    // Generic
    /// Unknown error.
    Unknown,
}

impl fmt::Display for SendGridErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAuth => write!(f, "missing_auth"),
            Self::InvalidConfiguration => write!(f, "invalid_configuration"),
            Self::MissingField => write!(f, "missing_field"),
            Self::InvalidScopes => write!(f, "invalid_scopes"),
            Self::InvalidIdentifier => write!(f, "invalid_identifier"),
            Self::Serialization => write!(f, "serialization_error"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::UnprocessableEntity => write!(f, "unprocessable_entity"),
            Self::ServerError => write!(f, "server_error"),
            Self::DeadlineExceeded => write!(f, "deadline_exceeded"),
            Self::Deserialization => write!(f, "deserialization_error"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Rate limit metadata parsed from `X-Ratelimit-*` response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the current window.
    pub remaining: u32,
    /// Time when the window resets.
    pub reset_at: DateTime<Utc>,
}

impl RateLimitInfo {
    /// Returns true if the window has no requests left.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// SendGrid API error with detailed information.
#[derive(Error, Debug)]
pub struct SendGridError {
    /// Error kind.
    kind: SendGridErrorKind,
    /// Error message (the SendGrid detail string for API errors).
    message: String,
    /// HTTP status code.
    status_code: Option<u16>,
    /// HTTP method of the failed request.
    method: Option<String>,
    /// URL of the failed request.
    url: Option<String>,
    /// Rate limit info (if applicable).
    rate_limit: Option<RateLimitInfo>,
    /// Underlying cause.
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for SendGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.kind)?;
        if let (Some(method), Some(url)) = (&self.method, &self.url) {
            write!(f, "{} {}: ", method, url)?;
        }
        write!(f, "{}", self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {})", code)?;
        }
        if let Some(ref cause) = self.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

impl SendGridError {
    /// Creates a new SendGrid error.
    pub fn new(kind: SendGridErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            method: None,
            url: None,
            rate_limit: None,
            cause: None,
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Sets the request method and URL.
    pub fn with_request(mut self, method: impl Into<String>, url: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self.url = Some(url.into());
        self
    }

    /// Sets the rate limit info.
    pub fn with_rate_limit(mut self, info: RateLimitInfo) -> Self {
        self.rate_limit = Some(info);
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> &SendGridErrorKind {
        &self.kind
    }

    /// Gets the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Gets the rate limit info.
    pub fn rate_limit(&self) -> Option<&RateLimitInfo> {
        self.rate_limit.as_ref()
    }

    /// Returns true if the error reports a missing resource.
    pub fn is_not_found(&self) -> bool {
        self.status_code == Some(404)
    }

    /// Returns true if this error is retryable.
    ///
    /// Only rate limiting is retried; every other failure is terminal.
    pub fn is_retryable(&self) -> bool {
        self.kind == SendGridErrorKind::RateLimited
    }

    /// Returns the time left until the rate limit window resets.
    pub fn reset_after(&self) -> Option<std::time::Duration> {
        let info = self.rate_limit.as_ref()?;
        (info.reset_at - Utc::now()).to_std().ok()
    }

    /// Returns a hint on how to resolve the error, if one applies.
    pub fn remediation(&self) -> Option<&'static str> {
        match self.status_code? {
            401 => Some("check that the API key is valid and has not been revoked"),
            403 => Some("the API key lacks the scope required for this operation"),
            404 => Some("the resource may have been deleted outside of this configuration"),
            429 => Some("too many requests; consider raising the operation timeout"),
            500..=599 => Some("SendGrid is experiencing issues; try again later"),
            _ => None,
        }
    }

    /// Creates an error from a failed HTTP response.
    pub fn from_response(status: u16, body: &str, rate_limit: Option<RateLimitInfo>) -> Self {
        let detail = parse_detail(body).unwrap_or_else(|| format!("HTTP {}", status));

        if status == 429 {
            let mut error = Self::new(SendGridErrorKind::RateLimited, detail).with_status(status);
            if let Some(info) = rate_limit {
                error = error.with_rate_limit(info);
            }
            return error;
        }

        Self::new(Self::kind_from_status(status), detail).with_status(status)
    }

    /// Maps HTTP status code to error kind.
    fn kind_from_status(status: u16) -> SendGridErrorKind {
        match status {
            400 => SendGridErrorKind::BadRequest,
            401 => SendGridErrorKind::Unauthorized,
            403 => SendGridErrorKind::Forbidden,
            404 => SendGridErrorKind::NotFound,
            409 => SendGridErrorKind::Conflict,
            422 => SendGridErrorKind::UnprocessableEntity,
            429 => SendGridErrorKind::RateLimited,
            500..=599 => SendGridErrorKind::ServerError,
            _ => SendGridErrorKind::Unknown,
        }
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(SendGridErrorKind::InvalidConfiguration, message)
    }

    /// Creates a precondition error for an empty required field.
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(SendGridErrorKind::MissingField, message)
    }

    /// Creates an error for an identifier unsafe to put in a URL path.
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::new(SendGridErrorKind::InvalidIdentifier, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SendGridErrorKind::NotFound, message).with_status(404)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(SendGridErrorKind::Timeout, message)
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::new(SendGridErrorKind::Deserialization, message)
    }
}

/// Normalizes a SendGrid error body into a single detail string.
///
/// Returns `None` for an empty body.
pub fn parse_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => return Some(trimmed.to_string()),
    };

    if let Value::Object(map) = &value {
        if map.len() == 1 {
            if let Some(Value::String(detail)) = map.get("detail") {
                return Some(detail.clone());
            }
        }

        if let Some(Value::Array(errors)) = map.get("errors") {
            let messages: Vec<String> = errors
                .iter()
                .filter_map(|e| {
                    let message = e.get("message").and_then(Value::as_str)?;
                    match e.get("field").and_then(Value::as_str) {
                        Some(field) if !field.is_empty() => Some(format!("{}: {}", field, message)),
                        _ => Some(message.to_string()),
                    }
                })
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
    }

    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        let error = SendGridError::new(SendGridErrorKind::NotFound, "resource not found")
            .with_status(404)
            .with_request("GET", "https://api.sendgrid.com/v3/api_keys/abc");

        let display = format!("{}", error);
        assert!(display.contains("not_found"));
        assert!(display.contains("GET https://api.sendgrid.com/v3/api_keys/abc"));
        assert!(display.contains("resource not found"));
        assert!(display.contains("404"));
    }

    #[test]
    fn test_parse_detail_envelope() {
        assert_eq!(
            parse_detail(r#"{"detail":"name is required"}"#).as_deref(),
            Some("name is required")
        );
    }

    #[test]
    fn test_parse_errors_array() {
        let body = r#"{"errors":[{"field":"name","message":"is required"},{"field":null,"message":"bad"}]}"#;
        assert_eq!(parse_detail(body).as_deref(), Some("name: is required; bad"));
    }

    #[test]
    fn test_parse_arbitrary_json() {
        assert_eq!(parse_detail(r#"{"a":1,"b":2}"#).as_deref(), Some(r#"{"a":1,"b":2}"#));
        assert_eq!(parse_detail(r#"["x"]"#).as_deref(), Some(r#"["x"]"#));
    }

    #[test]
    fn test_parse_raw_text_and_empty() {
        assert_eq!(parse_detail("  upstream failure \n").as_deref(), Some("upstream failure"));
        assert_eq!(parse_detail("   "), None);
    }

    #[test_case(400, SendGridErrorKind::BadRequest ; "bad request")]
    #[test_case(401, SendGridErrorKind::Unauthorized ; "unauthorized")]
    #[test_case(403, SendGridErrorKind::Forbidden ; "forbidden")]
    #[test_case(404, SendGridErrorKind::NotFound ; "not found")]
    #[test_case(429, SendGridErrorKind::RateLimited ; "rate limited")]
    #[test_case(503, SendGridErrorKind::ServerError ; "server error")]
    fn test_from_response_kind(status: u16, kind: SendGridErrorKind) {
        let error = SendGridError::from_response(status, "", None);
        assert_eq!(*error.kind(), kind);
        assert_eq!(error.status_code(), Some(status));
        assert_eq!(error.message(), format!("HTTP {}", status));
    }

    #[test]
    fn test_only_rate_limit_is_retryable() {
        assert!(SendGridError::from_response(429, "", None).is_retryable());
        assert!(!SendGridError::from_response(500, "", None).is_retryable());
        assert!(!SendGridError::timeout("slow").is_retryable());
    }

    #[test]
    fn test_rate_limit_info_kept() {
        let info = RateLimitInfo {
            limit: 600,
            remaining: 0,
            reset_at: Utc::now() + chrono::Duration::seconds(30),
        };
        let error = SendGridError::from_response(429, r#"{"detail":"slow down"}"#, Some(info));

        assert_eq!(error.message(), "slow down");
        assert!(error.rate_limit().map(RateLimitInfo::is_exhausted).unwrap_or(false));
        assert!(error.reset_after().is_some());
    }

    #[test]
    fn test_remediation() {
        assert!(SendGridError::from_response(401, "", None).remediation().is_some());
        assert!(SendGridError::from_response(400, "", None).remediation().is_none());
        assert!(SendGridError::missing_field("name is required").remediation().is_none());
    }
}
