//! Raw HTTP responses and their normalization into typed results.

use crate::errors::{RateLimitInfo, SendGridError, SendGridResult};
use chrono::DateTime;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// Rate limit ceiling header.
pub const RATE_LIMIT_LIMIT_HEADER: &str = "x-ratelimit-limit";
/// Remaining requests header.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
/// Window reset header (unix seconds).
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// A response as returned by the transport, before status interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP method of the request.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
    /// Rate limit metadata, when the headers were present.
    pub rate_limit: Option<RateLimitInfo>,
}

impl RawResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Converts a non-2xx response into a [`SendGridError`].
    pub fn into_result(self) -> SendGridResult<Self> {
        if self.is_success() {
            return Ok(self);
        }

        let error = SendGridError::from_response(self.status, &self.body, self.rate_limit.clone())
            .with_request(self.method, self.url);
        Err(error)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> SendGridResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            SendGridError::deserialization(format!(
                "Failed to deserialize response from {} {}: {}",
                self.method, self.url, e
            ))
        })
    }
}

/// Parses the `X-Ratelimit-*` headers.
///
/// Returns `None` unless all three headers are present and well formed.
pub fn extract_rate_limit(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let limit = headers
        .get(RATE_LIMIT_LIMIT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())?;

    let remaining = headers
        .get(RATE_LIMIT_REMAINING_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())?;

    let reset_timestamp: i64 = headers
        .get(RATE_LIMIT_RESET_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo {
        limit,
        remaining,
        reset_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SendGridErrorKind;
    use reqwest::header::HeaderValue;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            method: "GET".to_string(),
            url: "https://api.sendgrid.com/v3/templates/t1".to_string(),
            status,
            body: body.to_string(),
            rate_limit: None,
        }
    }

    #[test]
    fn test_extract_rate_limit() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("600"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));

        let info = extract_rate_limit(&headers).unwrap();
        assert_eq!(info.limit, 600);
        assert!(info.is_exhausted());
        assert_eq!(info.reset_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_extract_rate_limit_partial_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("3"));
        assert!(extract_rate_limit(&headers).is_none());
    }

    #[test]
    fn test_success_passes_through() {
        let response = raw(204, "").into_result().unwrap();
        assert_eq!(response.status, 204);
    }

    #[test]
    fn test_failure_normalized() {
        let err = raw(400, r#"{"detail":"name is required"}"#).into_result().unwrap_err();
        assert_eq!(*err.kind(), SendGridErrorKind::BadRequest);
        assert_eq!(err.message(), "name is required");
        assert!(err.to_string().contains("GET https://api.sendgrid.com/v3/templates/t1"));
    }

    #[test]
    fn test_json_decode_error() {
        let err = raw(200, "not json").json::<serde_json::Value>().unwrap_err();
        assert_eq!(*err.kind(), SendGridErrorKind::Deserialization);
    }
}
