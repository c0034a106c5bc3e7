//! Event webhook settings.
//!
//! The account has exactly one event webhook. It is never created or removed,
//! only configured: "deleting" it turns it off.

use crate::client::SendGridClient;
use crate::errors::{SendGridError, SendGridResult};
use serde::{Deserialize, Serialize};
use crate::services::nullable;

const SETTINGS_PATH: &str = "/user/webhooks/event/settings";

/// Service for the event webhook.
pub struct EventWebhookService<'a> {
    client: &'a SendGridClient,
}

impl<'a> EventWebhookService<'a> {
    /// Creates a new event webhook service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Gets the current settings.
    pub async fn get(&self) -> SendGridResult<EventWebhookSettings> {
        self.client.get(SETTINGS_PATH).await
    }

    /// Replaces the settings.
    ///
    /// An enabled webhook needs a target URL.
    pub async fn update(
        &self,
        settings: &EventWebhookSettings,
    ) -> SendGridResult<EventWebhookSettings> {
        if settings.enabled && settings.url.trim().is_empty() {
            return Err(SendGridError::missing_field(
                "url is required when the event webhook is enabled",
            ));
        }
        self.client.patch(SETTINGS_PATH, settings).await
    }

    /// Disables the webhook.
    pub async fn delete(&self) -> SendGridResult<bool> {
        let disabled = EventWebhookSettings::default();
        match self.client.patch_no_response(SETTINGS_PATH, &disabled).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(true),
            Err(e) => Err(e),
        }
    }
}

/// Event webhook configuration. Every flag subscribes to one event type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct EventWebhookSettings {
    #[serde(deserialize_with = "nullable")]
    pub enabled: bool,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub bounce: bool,
    #[serde(deserialize_with = "nullable")]
    pub click: bool,
    #[serde(deserialize_with = "nullable")]
    pub deferred: bool,
    #[serde(deserialize_with = "nullable")]
    pub delivered: bool,
    #[serde(deserialize_with = "nullable")]
    pub dropped: bool,
    #[serde(deserialize_with = "nullable")]
    pub open: bool,
    #[serde(deserialize_with = "nullable")]
    pub processed: bool,
    #[serde(deserialize_with = "nullable")]
    pub spam_report: bool,
    #[serde(deserialize_with = "nullable")]
    pub unsubscribe: bool,
    #[serde(deserialize_with = "nullable")]
    pub group_resubscribe: bool,
    #[serde(deserialize_with = "nullable")]
    pub group_unsubscribe: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_disable_everything() {
        let json = serde_json::to_value(EventWebhookSettings::default()).unwrap();
        assert_eq!(json["enabled"], false);
        assert_eq!(json["open"], false);
        assert_eq!(json["url"], "");
    }

    #[test]
    fn test_settings_missing_fields_default() {
        let body = r#"{"enabled":true,"url":"https://hooks.example.com","click":true}"#;
        let settings: EventWebhookSettings = serde_json::from_str(body).unwrap();
        assert!(settings.enabled);
        assert!(settings.click);
        assert!(!settings.bounce);
    }

    #[test]
    fn test_settings_null_fields_default() {
        let settings: EventWebhookSettings =
            serde_json::from_str(r#"{"enabled":false,"url":null,"bounce":null}"#).unwrap();
        assert_eq!(settings, EventWebhookSettings::default());
    }
}
