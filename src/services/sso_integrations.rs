//! SSO integration operations.

use crate::client::SendGridClient;
use crate::errors::SendGridResult;
use crate::services::{nullable, require, require_id};
use serde::{Deserialize, Serialize};

/// Service for SSO integration operations.
pub struct SsoIntegrationsService<'a> {
    client: &'a SendGridClient,
}

impl<'a> SsoIntegrationsService<'a> {
    /// Creates a new SSO integrations service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Creates an SSO integration.
    pub async fn create(&self, request: &SsoIntegrationRequest) -> SendGridResult<SsoIntegration> {
        request.check()?;
        self.client.post("/sso/integrations", request).await
    }

    /// Gets an SSO integration.
    pub async fn get(&self, id: &str) -> SendGridResult<SsoIntegration> {
        require_id(id, "SSO integration ID is required")?;
        self.client.get(&format!("/sso/integrations/{}", id)).await
    }

    /// Lists SSO integrations.
    pub async fn list(&self) -> SendGridResult<Vec<SsoIntegration>> {
        self.client.get("/sso/integrations").await
    }

    /// Updates an SSO integration.
    pub async fn update(
        &self,
        id: &str,
        request: &SsoIntegrationRequest,
    ) -> SendGridResult<SsoIntegration> {
        require_id(id, "SSO integration ID is required")?;
        request.check()?;
        self.client
            .patch(&format!("/sso/integrations/{}", id), request)
            .await
    }

    /// Deletes an SSO integration.
    pub async fn delete(&self, id: &str) -> SendGridResult<bool> {
        require_id(id, "SSO integration ID is required")?;
        self.client
            .delete_idempotent(&format!("/sso/integrations/{}", id))
            .await
    }
}

/// A SAML identity provider integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SsoIntegration {
    /// Integration ID.
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Integration enabled.
    #[serde(deserialize_with = "nullable")]
    pub enabled: bool,
    /// IdP sign-in URL.
    #[serde(deserialize_with = "nullable")]
    pub signin_url: String,
    /// IdP sign-out URL.
    #[serde(deserialize_with = "nullable")]
    pub signout_url: String,
    /// IdP entity ID.
    #[serde(deserialize_with = "nullable")]
    pub entity_id: String,
    /// Setup finished on the IdP side.
    #[serde(deserialize_with = "nullable")]
    pub completed_integration: bool,
    /// Last update as a unix timestamp.
    #[serde(deserialize_with = "nullable")]
    pub last_updated: i64,
    /// SendGrid audience URL to configure in the IdP.
    pub audience_url: Option<String>,
    /// SendGrid ACS URL to configure in the IdP.
    pub single_signon_url: Option<String>,
}

/// Fields for creating or updating an SSO integration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SsoIntegrationRequest {
    /// Display name.
    pub name: String,
    /// Integration enabled.
    pub enabled: bool,
    /// IdP sign-in URL.
    pub signin_url: String,
    /// IdP sign-out URL.
    pub signout_url: String,
    /// IdP entity ID.
    pub entity_id: String,
    /// Setup finished on the IdP side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_integration: Option<bool>,
}

impl SsoIntegrationRequest {
    fn check(&self) -> SendGridResult<()> {
        require(&self.name, "name is required")?;
        require(&self.signin_url, "signin_url is required")?;
        require(&self.signout_url, "signout_url is required")?;
        require(&self.entity_id, "entity_id is required")
    }
}
