//! Shared helpers for integration tests.

#![allow(dead_code)]

use integrations_sendgrid::{OperationTimeouts, RetryConfig, SendGridClient};
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "SG.test-key";

fn fast_retry() -> RetryConfig {
    RetryConfig {
        initial_backoff: Duration::from_millis(10),
        max_backoff: Duration::from_millis(50),
        multiplier: 2.0,
        enabled: true,
    }
}

/// Client pointed at the mock server with short backoffs.
pub fn client(server: &MockServer) -> SendGridClient {
    client_with_timeout(server, Duration::from_secs(5))
}

/// Client whose retry loop gives up after `timeout`.
pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> SendGridClient {
    SendGridClient::builder()
        .base_url(server.uri())
        .api_key(TEST_API_KEY)
        .retry(fast_retry())
        .operation_timeouts(OperationTimeouts::uniform(timeout))
        .build()
        .expect("client should build")
}

/// Client acting on behalf of a subuser.
pub fn subuser_client(server: &MockServer, subuser: &str) -> SendGridClient {
    SendGridClient::builder()
        .base_url(server.uri())
        .api_key(TEST_API_KEY)
        .on_behalf_of(subuser)
        .retry(fast_retry())
        .build()
        .expect("client should build")
}
