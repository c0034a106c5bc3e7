//! Logging hooks and subscriber setup.

mod logging;

pub use logging::{LogFormat, LogLevel, LoggingConfig};

use crate::errors::RateLimitInfo;
use std::time::Duration;
use tracing::{debug, warn};

/// Tracing hooks for SendGrid API requests.
pub struct TracingHooks;

impl TracingHooks {
    /// Logs the start of an API request.
    pub fn on_request_start(method: &str, url: &str) {
        debug!(
            method = %method,
            url = %url,
            "SendGrid API request started"
        );
    }

    /// Logs the completion of an API request.
    pub fn on_request_complete(method: &str, url: &str, status: u16, duration: Duration) {
        debug!(
            method = %method,
            url = %url,
            status = status,
            duration_ms = duration.as_millis() as u64,
            "SendGrid API request completed"
        );
    }

    /// Logs a transport failure.
    pub fn on_request_error(method: &str, url: &str, error: &str) {
        warn!(
            method = %method,
            url = %url,
            error = %error,
            "SendGrid API request failed"
        );
    }

    /// Logs rate limit headers.
    pub fn on_rate_limit_update(info: &RateLimitInfo) {
        debug!(
            limit = info.limit,
            remaining = info.remaining,
            reset_at = %info.reset_at,
            "Rate limit updated"
        );
    }

    /// Logs an exhausted rate limit window.
    pub fn on_rate_limit_exceeded(info: &RateLimitInfo) {
        warn!(
            limit = info.limit,
            remaining = info.remaining,
            reset_at = %info.reset_at,
            "Rate limit exceeded"
        );
    }
}

/// Headers whose values never appear in logs.
pub const SENSITIVE_HEADERS: &[&str] = &["authorization", "on-behalf-of", "cookie", "set-cookie"];

/// Redacts sensitive values in headers.
pub fn redact_header(name: &str, value: &str) -> String {
    if SENSITIVE_HEADERS.contains(&name.to_lowercase().as_str()) {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_header() {
        assert_eq!(redact_header("Authorization", "Bearer SG.key"), "[REDACTED]");
        assert_eq!(redact_header("on-behalf-of", "subuser-a"), "[REDACTED]");
        assert_eq!(redact_header("Content-Type", "application/json"), "application/json");
    }
}
