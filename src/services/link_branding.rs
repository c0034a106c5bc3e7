//! Link branding operations.

use crate::client::SendGridClient;
use crate::errors::SendGridResult;
use crate::services::{nullable, require, require_id, DnsRecord, DnsValidation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Service for link branding operations.
pub struct LinkBrandingService<'a> {
    client: &'a SendGridClient,
}

impl<'a> LinkBrandingService<'a> {
    /// Creates a new link branding service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Creates a branded link.
    pub async fn create(
        &self,
        request: &CreateLinkBrandingRequest,
    ) -> SendGridResult<LinkBranding> {
        require(&request.domain, "domain is required")?;
        self.client.post("/whitelabel/links", request).await
    }

    /// Gets a branded link.
    pub async fn get(&self, id: &str) -> SendGridResult<LinkBranding> {
        require_id(id, "link branding ID is required")?;
        self.client.get(&format!("/whitelabel/links/{}", id)).await
    }

    /// Lists branded links.
    pub async fn list(&self) -> SendGridResult<Vec<LinkBranding>> {
        self.client.get("/whitelabel/links").await
    }

    /// Changes whether the link is the default one.
    pub async fn update(&self, id: &str, default: bool) -> SendGridResult<LinkBranding> {
        require_id(id, "link branding ID is required")?;
        self.client
            .patch(&format!("/whitelabel/links/{}", id), &UpdateLinkBrandingRequest { default })
            .await
    }

    /// Asks SendGrid to check the link's DNS records.
    pub async fn validate(&self, id: &str) -> SendGridResult<DnsValidation> {
        require_id(id, "link branding ID is required")?;
        self.client
            .post(&format!("/whitelabel/links/{}/validate", id), &serde_json::json!({}))
            .await
    }

    /// Deletes a branded link.
    pub async fn delete(&self, id: &str) -> SendGridResult<bool> {
        require_id(id, "link branding ID is required")?;
        self.client
            .delete_idempotent(&format!("/whitelabel/links/{}", id))
            .await
    }
}

/// A branded tracking link domain.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkBranding {
    /// Link branding ID.
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    /// Owning user ID.
    #[serde(deserialize_with = "nullable")]
    pub user_id: i64,
    /// Root domain.
    #[serde(deserialize_with = "nullable")]
    pub domain: String,
    /// Subdomain for tracked links.
    #[serde(deserialize_with = "nullable")]
    pub subdomain: String,
    /// Username the link belongs to.
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    /// Default link branding for the account.
    #[serde(deserialize_with = "nullable")]
    pub default: bool,
    /// All records validated.
    #[serde(deserialize_with = "nullable")]
    pub valid: bool,
    /// Legacy whitelabel.
    #[serde(deserialize_with = "nullable")]
    pub legacy: bool,
    /// Records keyed by purpose (`domain_cname`, `owner_cname`).
    #[serde(deserialize_with = "nullable")]
    pub dns: BTreeMap<String, DnsRecord>,
}

/// Fields for creating a branded link.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateLinkBrandingRequest {
    /// Root domain.
    pub domain: String,
    /// Subdomain for tracked links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    /// Make this the default.
    pub default: bool,
}

#[derive(Debug, Serialize)]
struct UpdateLinkBrandingRequest {
    default: bool,
}
