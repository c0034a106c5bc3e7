//! Inbound parse webhook operations.

use crate::client::SendGridClient;
use crate::errors::SendGridResult;
use crate::services::{nullable, require, require_id, ResultList};
use serde::{Deserialize, Serialize};

const SETTINGS_PATH: &str = "/user/webhooks/parse/settings";

/// Service for inbound parse webhooks, keyed by receiving hostname.
pub struct ParseWebhooksService<'a> {
    client: &'a SendGridClient,
}

impl<'a> ParseWebhooksService<'a> {
    /// Creates a new parse webhooks service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Creates a parse webhook.
    pub async fn create(&self, webhook: &ParseWebhook) -> SendGridResult<ParseWebhook> {
        require(&webhook.hostname, "hostname is required")?;
        require(&webhook.url, "url is required")?;
        self.client.post(SETTINGS_PATH, webhook).await
    }

    /// Gets the parse webhook for `hostname`.
    pub async fn get(&self, hostname: &str) -> SendGridResult<ParseWebhook> {
        require_id(hostname, "hostname is required")?;
        self.client
            .get(&format!("{}/{}", SETTINGS_PATH, hostname))
            .await
    }

    /// Lists parse webhooks.
    pub async fn list(&self) -> SendGridResult<Vec<ParseWebhook>> {
        let response: ResultList<ParseWebhook> = self.client.get(SETTINGS_PATH).await?;
        Ok(response.result)
    }

    /// Updates the parse webhook for `hostname`.
    pub async fn update(
        &self,
        hostname: &str,
        webhook: &ParseWebhook,
    ) -> SendGridResult<ParseWebhook> {
        require_id(hostname, "hostname is required")?;
        require(&webhook.url, "url is required")?;
        self.client
            .patch(&format!("{}/{}", SETTINGS_PATH, hostname), webhook)
            .await
    }

    /// Deletes the parse webhook for `hostname`.
    pub async fn delete(&self, hostname: &str) -> SendGridResult<bool> {
        require_id(hostname, "hostname is required")?;
        self.client
            .delete_idempotent(&format!("{}/{}", SETTINGS_PATH, hostname))
            .await
    }
}

/// Routes mail received at `hostname` to `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseWebhook {
    /// Receiving hostname.
    #[serde(deserialize_with = "nullable")]
    pub hostname: String,
    /// Target URL for parsed messages.
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    /// Run spam checks.
    #[serde(deserialize_with = "nullable")]
    pub spam_check: bool,
    /// Post the full MIME message.
    #[serde(deserialize_with = "nullable")]
    pub send_raw: bool,
}
