//! Rate-limit retry behaviour through the real transport.

mod common;

use integrations_sendgrid::{
    Operation, OperationTimeouts, RetryConfig, SendGridClient, SendGridErrorKind, SendGridResult,
    UnsubscribeGroupRequest,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rate_limited() -> ResponseTemplate {
    ResponseTemplate::new(429)
        .insert_header("x-ratelimit-remaining", "0")
        .set_body_json(json!({ "errors": [{ "field": null, "message": "too many requests" }] }))
}

#[derive(Debug, Clone, Copy)]
enum Call {
    Read,
    Create,
    Update,
    Delete,
}

impl Call {
    fn http_method(self) -> &'static str {
        match self {
            Call::Read => "GET",
            Call::Create => "POST",
            Call::Update => "PATCH",
            Call::Delete => "DELETE",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Call::Read => "/templates/t1",
            Call::Create => "/api_keys",
            Call::Update => "/asm/groups/14",
            Call::Delete => "/templates/t1",
        }
    }

    fn success(self) -> ResponseTemplate {
        match self {
            Call::Read => ResponseTemplate::new(200).set_body_json(json!({
                "id": "t1",
                "name": "welcome",
                "generation": "dynamic",
                "versions": []
            })),
            Call::Create => ResponseTemplate::new(201).set_body_json(json!({
                "api_key_id": "abc",
                "name": "k1",
                "scopes": ["mail.send", "sender_verification_eligible"]
            })),
            Call::Update => ResponseTemplate::new(200).set_body_json(json!({
                "id": 14,
                "name": "Weekly",
                "description": "Weekly digest",
                "is_default": false
            })),
            Call::Delete => ResponseTemplate::new(204),
        }
    }

    async fn run(self, client: &SendGridClient) -> SendGridResult<()> {
        match self {
            Call::Read => {
                let templates = client.templates();
                client
                    .with_retry(Operation::Read, || templates.get("t1"))
                    .await
                    .map(drop)
            }
            Call::Create => {
                let api_keys = client.api_keys();
                let scopes = vec!["mail.send".to_string()];
                client
                    .with_retry(Operation::Create, || api_keys.create("k1", &scopes))
                    .await
                    .map(drop)
            }
            Call::Update => {
                let groups = client.unsubscribe_groups();
                let request = UnsubscribeGroupRequest {
                    name: "Weekly".to_string(),
                    description: "Weekly digest".to_string(),
                    is_default: false,
                };
                client
                    .with_retry(Operation::Update, || groups.update("14", &request))
                    .await
                    .map(drop)
            }
            Call::Delete => {
                let templates = client.templates();
                client
                    .with_retry(Operation::Delete, || templates.delete("t1"))
                    .await
                    .map(drop)
            }
        }
    }
}

async fn mount_rate_limited_once(server: &MockServer, call: Call) {
    Mock::given(method(call.http_method()))
        .and(path(call.path()))
        .respond_with(rate_limited())
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method(call.http_method()))
        .and(path(call.path()))
        .respond_with(call.success())
        .expect(1)
        .mount(server)
        .await;
}

#[test_case(Call::Read ; "read")]
#[test_case(Call::Create ; "create")]
#[test_case(Call::Update ; "update")]
#[test_case(Call::Delete ; "delete")]
#[tokio::test]
async fn test_rate_limited_request_is_retried(call: Call) {
    let server = MockServer::start().await;
    mount_rate_limited_once(&server, call).await;

    let client = common::client(&server);
    call.run(&client).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[test_case(Call::Create ; "create")]
#[test_case(Call::Update ; "update")]
#[test_case(Call::Delete ; "delete")]
#[tokio::test]
async fn test_retry_fits_timeout_shorter_than_backoff(call: Call) {
    let server = MockServer::start().await;
    mount_rate_limited_once(&server, call).await;

    let client = SendGridClient::builder()
        .base_url(server.uri())
        .api_key(common::TEST_API_KEY)
        .retry(RetryConfig::default())
        .operation_timeouts(OperationTimeouts::uniform(Duration::from_millis(800)))
        .build()
        .unwrap();

    call.run(&client).await.unwrap();
}

#[test_case(Call::Read, 400 ; "read bad request")]
#[test_case(Call::Read, 401 ; "read unauthorized")]
#[test_case(Call::Create, 400 ; "create bad request")]
#[test_case(Call::Create, 403 ; "create forbidden")]
#[test_case(Call::Update, 403 ; "update forbidden")]
#[test_case(Call::Update, 500 ; "update server error")]
#[test_case(Call::Delete, 400 ; "delete bad request")]
#[test_case(Call::Delete, 500 ; "delete server error")]
#[tokio::test]
async fn test_other_errors_are_not_retried(call: Call, status: u16) {
    let server = MockServer::start().await;
    Mock::given(method(call.http_method()))
        .and(path(call.path()))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "detail": "nope" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server);
    let err = call.run(&client).await.unwrap_err();

    assert_eq!(err.status_code(), Some(status));
    assert_eq!(err.message(), "nope");
}

#[tokio::test]
async fn test_persistent_rate_limit_exhausts_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/asm/groups/7"))
        .respond_with(rate_limited())
        .mount(&server)
        .await;

    let client = common::client_with_timeout(&server, Duration::from_millis(200));
    let groups = client.unsubscribe_groups();
    let err = client
        .with_retry(Operation::Delete, || groups.delete("7"))
        .await
        .unwrap_err();

    assert_eq!(*err.kind(), SendGridErrorKind::DeadlineExceeded);
    assert_eq!(err.status_code(), Some(429));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.len() >= 2);
}

#[tokio::test]
async fn test_slow_response_is_cancelled_at_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/webhooks/event/settings"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = common::client_with_timeout(&server, Duration::from_millis(100));
    let webhook = client.event_webhook();
    let err = client
        .with_retry(Operation::Read, || webhook.get())
        .await
        .unwrap_err();

    assert_eq!(*err.kind(), SendGridErrorKind::DeadlineExceeded);
}
