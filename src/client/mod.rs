//! SendGrid API client implementation.

mod response;

pub use response::{
    extract_rate_limit, RawResponse, RATE_LIMIT_LIMIT_HEADER, RATE_LIMIT_REMAINING_HEADER,
    RATE_LIMIT_RESET_HEADER,
};

use crate::auth::{CredentialProvider, Credentials, StaticCredentialProvider};
use crate::config::{
    Operation, OperationTimeouts, RetryConfig, SendGridConfig, SendGridConfigBuilder,
};
use crate::errors::{SendGridError, SendGridErrorKind, SendGridResult};
use crate::observability::{redact_header, TracingHooks};
use crate::resilience::RetryPolicy;
use crate::scopes::ScopeCatalog;
use crate::services::*;
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Header selecting the subuser a parent account acts for.
pub const ON_BEHALF_OF_HEADER: &str = "on-behalf-of";

/// SendGrid API client.
///
/// Immutable after construction and cheap to share by reference.
pub struct SendGridClient {
    /// HTTP client.
    http: Client,
    /// Configuration.
    config: SendGridConfig,
    /// Rate-limit retry policy.
    retry: RetryPolicy,
    /// Assignable and automatic scopes.
    scopes: Arc<ScopeCatalog>,
    /// Source of the API key, consulted on every request.
    credentials: Arc<dyn CredentialProvider>,
}

impl SendGridClient {
    /// Creates a new SendGrid client.
    pub fn new(config: SendGridConfig) -> SendGridResult<Self> {
        Self::with_scope_catalog(config, Arc::new(ScopeCatalog::sendgrid()))
    }

    /// Creates a client sharing an existing scope catalog.
    pub fn with_scope_catalog(
        config: SendGridConfig,
        scopes: Arc<ScopeCatalog>,
    ) -> SendGridResult<Self> {
        config.validate()?;
        let key = config.require_api_key()?;
        tracing::debug!(
            base_url = %config.base_url,
            api_key = key.masked(),
            "Creating SendGrid client"
        );

        let credentials = Arc::new(StaticCredentialProvider::new(key.clone()));
        Self::with_credential_provider(config, scopes, credentials)
    }

    /// Creates a client that resolves its API key through `credentials`
    /// before each request. `config.api_key` is ignored.
    pub fn with_credential_provider(
        config: SendGridConfig,
        scopes: Arc<ScopeCatalog>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> SendGridResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| {
                SendGridError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let retry = RetryPolicy::from_config(&config.retry);

        Ok(Self {
            http,
            config,
            retry,
            scopes,
            credentials,
        })
    }

    /// Creates a new client builder.
    pub fn builder() -> SendGridClientBuilder {
        SendGridClientBuilder::new()
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Gets the subuser requests are made on behalf of.
    pub fn on_behalf_of(&self) -> Option<&str> {
        self.config.on_behalf_of.as_deref()
    }

    /// Gets the scope catalog.
    pub fn scope_catalog(&self) -> &ScopeCatalog {
        &self.scopes
    }

    /// Gets the configured operation timeouts.
    pub fn operation_timeouts(&self) -> &OperationTimeouts {
        &self.config.operation_timeouts
    }

    /// Runs `f` under the rate-limit retry policy, bounded by the configured
    /// timeout for `operation`.
    pub async fn with_retry<F, Fut, T>(&self, operation: Operation, f: F) -> SendGridResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = SendGridResult<T>>,
    {
        let timeout = self.config.operation_timeouts.for_operation(operation);
        self.retry_with_timeout(timeout, f).await
    }

    /// Runs `f` under the rate-limit retry policy with an explicit timeout.
    pub async fn retry_with_timeout<F, Fut, T>(&self, timeout: Duration, f: F) -> SendGridResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = SendGridResult<T>>,
    {
        self.retry.execute(timeout, f).await
    }

    // Service accessors

    /// Gets the API keys service.
    pub fn api_keys(&self) -> ApiKeysService {
        ApiKeysService::new(self)
    }

    /// Gets the templates service.
    pub fn templates(&self) -> TemplatesService {
        TemplatesService::new(self)
    }

    /// Gets the template versions service.
    pub fn template_versions(&self) -> TemplateVersionsService {
        TemplateVersionsService::new(self)
    }

    /// Gets the teammates service.
    pub fn teammates(&self) -> TeammatesService {
        TeammatesService::new(self)
    }

    /// Gets the subusers service.
    pub fn subusers(&self) -> SubusersService {
        SubusersService::new(self)
    }

    /// Gets the domain authentication service.
    pub fn domain_authentication(&self) -> DomainAuthenticationService {
        DomainAuthenticationService::new(self)
    }

    /// Gets the link branding service.
    pub fn link_branding(&self) -> LinkBrandingService {
        LinkBrandingService::new(self)
    }

    /// Gets the SSO integrations service.
    pub fn sso_integrations(&self) -> SsoIntegrationsService {
        SsoIntegrationsService::new(self)
    }

    /// Gets the SSO certificates service.
    pub fn sso_certificates(&self) -> SsoCertificatesService {
        SsoCertificatesService::new(self)
    }

    /// Gets the unsubscribe groups service.
    pub fn unsubscribe_groups(&self) -> UnsubscribeGroupsService {
        UnsubscribeGroupsService::new(self)
    }

    /// Gets the event webhook service.
    pub fn event_webhook(&self) -> EventWebhookService {
        EventWebhookService::new(self)
    }

    /// Gets the parse webhooks service.
    pub fn parse_webhooks(&self) -> ParseWebhooksService {
        ParseWebhooksService::new(self)
    }

    // HTTP methods

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> SendGridResult<T> {
        self.request(Method::GET, path, None, Option::<&()>::None).await
    }

    /// Makes a GET request with query parameters.
    pub async fn get_with_params<T: DeserializeOwned, P: Serialize>(
        &self,
        path: &str,
        params: &P,
    ) -> SendGridResult<T> {
        let query = serde_urlencoded::to_string(params).map_err(|e| {
            SendGridError::new(
                SendGridErrorKind::Serialization,
                format!("Failed to serialize parameters: {}", e),
            )
        })?;
        self.request(Method::GET, path, Some(&query), Option::<&()>::None)
            .await
    }

    /// Makes a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> SendGridResult<T> {
        self.request(Method::POST, path, None, Some(body)).await
    }

    /// Makes a POST request without a response body.
    pub async fn post_no_response<B: Serialize>(&self, path: &str, body: &B) -> SendGridResult<()> {
        self.request_no_response(Method::POST, path, Some(body)).await
    }

    /// Makes a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> SendGridResult<T> {
        self.request(Method::PUT, path, None, Some(body)).await
    }

    /// Makes a PUT request without a response body.
    pub async fn put_no_response<B: Serialize>(&self, path: &str, body: &B) -> SendGridResult<()> {
        self.request_no_response(Method::PUT, path, Some(body)).await
    }

    /// Makes a PATCH request.
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> SendGridResult<T> {
        self.request(Method::PATCH, path, None, Some(body)).await
    }

    /// Makes a PATCH request without a response body.
    pub async fn patch_no_response<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> SendGridResult<()> {
        self.request_no_response(Method::PATCH, path, Some(body)).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> SendGridResult<()> {
        self.request_no_response(Method::DELETE, path, Option::<&()>::None)
            .await
    }

    /// Makes a DELETE request where an absent resource counts as deleted.
    ///
    /// Returns `true` once the resource no longer exists.
    pub async fn delete_idempotent(&self, path: &str) -> SendGridResult<bool> {
        match self.delete(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %path, "Resource already absent");
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }

    /// Performs a request and returns the raw response without interpreting
    /// its status.
    pub async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<&B>,
    ) -> SendGridResult<RawResponse> {
        let url = self.build_url(path, query);

        let body_bytes = body.map(serde_json::to_vec).transpose().map_err(|e| {
            SendGridError::new(
                SendGridErrorKind::Serialization,
                format!("Failed to serialize request body: {}", e),
            )
        })?;

        let key = self.api_key().await?;
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(AUTHORIZATION, key.bearer_header())
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/json");

        if let Some(ref subuser) = self.config.on_behalf_of {
            tracing::trace!(
                header = ON_BEHALF_OF_HEADER,
                value = %redact_header(ON_BEHALF_OF_HEADER, subuser),
                "Acting on behalf of subuser"
            );
            request = request.header(ON_BEHALF_OF_HEADER, subuser);
        }

        if let Some(bytes) = body_bytes {
            request = request.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        TracingHooks::on_request_start(method.as_str(), &url);
        let started = Instant::now();

        let response = request.send().await.map_err(|e| {
            let error = if e.is_timeout() {
                SendGridError::timeout(format!("Request timed out: {}", e))
            } else if e.is_connect() {
                SendGridError::new(
                    SendGridErrorKind::ConnectionFailed,
                    format!("Connection failed: {}", e),
                )
            } else {
                SendGridError::new(SendGridErrorKind::Unknown, format!("Request failed: {}", e))
            };
            TracingHooks::on_request_error(method.as_str(), &url, &error.to_string());
            error.with_request(method.as_str(), url.as_str())
        })?;

        let status = response.status().as_u16();
        let rate_limit = extract_rate_limit(response.headers());
        if let Some(ref info) = rate_limit {
            TracingHooks::on_rate_limit_update(info);
        }

        let body = response.text().await.map_err(|e| {
            SendGridError::new(
                SendGridErrorKind::ConnectionFailed,
                format!("Failed to read response body: {}", e),
            )
            .with_request(method.as_str(), url.as_str())
        })?;

        TracingHooks::on_request_complete(method.as_str(), &url, status, started.elapsed());

        Ok(RawResponse {
            method: method.to_string(),
            url,
            status,
            body,
            rate_limit,
        })
    }

    // Internal methods

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<&B>,
    ) -> SendGridResult<T> {
        let response = self.execute(method, path, query, body).await?;
        response.json()
    }

    async fn request_no_response<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> SendGridResult<()> {
        self.execute(method, path, None, body).await?;
        Ok(())
    }

    async fn execute<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<&B>,
    ) -> SendGridResult<RawResponse> {
        let response = self.send(method, path, query, body).await?;
        match response.into_result() {
            Ok(response) => Ok(response),
            Err(error) => {
                if error.is_retryable() {
                    if let Some(info) = error.rate_limit() {
                        TracingHooks::on_rate_limit_exceeded(info);
                    }
                }
                tracing::debug!(error = %error, "SendGrid API returned an error");
                Err(error)
            }
        }
    }

    async fn api_key(&self) -> SendGridResult<Credentials> {
        let key = self.credentials.api_key().await?;
        if key.is_empty() {
            return Err(SendGridError::new(
                SendGridErrorKind::MissingAuth,
                "Credential provider returned an empty API key",
            ));
        }
        Ok(key)
    }

    fn build_url(&self, path: &str, query: Option<&str>) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        match query {
            Some(q) if !q.is_empty() => format!("{}/{}?{}", base, path, q),
            _ => format!("{}/{}", base, path),
        }
    }
}

/// Builder for SendGridClient.
pub struct SendGridClientBuilder {
    config_builder: SendGridConfigBuilder,
    scopes: Option<Arc<ScopeCatalog>>,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl SendGridClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: SendGridConfig::builder(),
            scopes: None,
            credentials: None,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(Credentials::new(key));
        self
    }

    /// Acts on behalf of a subuser.
    pub fn on_behalf_of(mut self, subuser: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.on_behalf_of(subuser);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Sets the retry configuration.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.config_builder = self.config_builder.retry(config);
        self
    }

    /// Disables retries.
    pub fn no_retry(mut self) -> Self {
        self.config_builder = self.config_builder.no_retry();
        self
    }

    /// Sets the operation timeouts.
    pub fn operation_timeouts(mut self, timeouts: OperationTimeouts) -> Self {
        self.config_builder = self.config_builder.operation_timeouts(timeouts);
        self
    }

    /// Uses a specific scope catalog.
    pub fn scope_catalog(mut self, catalog: Arc<ScopeCatalog>) -> Self {
        self.scopes = Some(catalog);
        self
    }

    /// Resolves the API key through a provider instead of a fixed key.
    pub fn credential_provider(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Builds the client.
    pub fn build(self) -> SendGridResult<SendGridClient> {
        let config = self.config_builder.build()?;
        let scopes = self
            .scopes
            .unwrap_or_else(|| Arc::new(ScopeCatalog::sendgrid()));
        match self.credentials {
            Some(provider) => SendGridClient::with_credential_provider(config, scopes, provider),
            None => SendGridClient::with_scope_catalog(config, scopes),
        }
    }
}

impl Default for SendGridClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SendGridClient {
        SendGridClient::builder().api_key("SG.test").build().unwrap()
    }

    #[test]
    fn test_build_url() {
        let client = client();

        assert_eq!(
            client.build_url("/api_keys/abc", None),
            "https://api.sendgrid.com/v3/api_keys/abc"
        );
        assert_eq!(
            client.build_url("teammates", Some("limit=10000")),
            "https://api.sendgrid.com/v3/teammates?limit=10000"
        );
        assert_eq!(
            client.build_url("templates", Some("")),
            "https://api.sendgrid.com/v3/templates"
        );
    }

    #[test]
    fn test_client_builder() {
        let client = SendGridClient::builder()
            .api_key("SG.xxxx")
            .base_url("http://localhost:3000/v3/")
            .on_behalf_of("subuser-a")
            .user_agent("test-client/1.0")
            .build()
            .unwrap();

        assert_eq!(client.on_behalf_of(), Some("subuser-a"));
        assert_eq!(
            client.build_url("/templates", None),
            "http://localhost:3000/v3/templates"
        );
    }

    #[test]
    fn test_client_requires_api_key() {
        let err = SendGridClient::builder().build().err().unwrap();
        assert_eq!(*err.kind(), SendGridErrorKind::MissingAuth);
    }

    #[test]
    fn test_shared_scope_catalog() {
        let catalog = Arc::new(ScopeCatalog::new(["mail.send"], ["2fa_required"]));
        let client = SendGridClient::builder()
            .api_key("SG.test")
            .scope_catalog(catalog.clone())
            .build()
            .unwrap();

        assert!(client.scope_catalog().is_valid("mail.send"));
        assert!(!client.scope_catalog().is_valid("templates.read"));
    }
}
