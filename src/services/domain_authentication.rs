//! Domain authentication (sender domain) operations.

use crate::client::SendGridClient;
use crate::errors::SendGridResult;
use crate::services::{nullable, require, require_id};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Service for domain authentication operations.
pub struct DomainAuthenticationService<'a> {
    client: &'a SendGridClient,
}

impl<'a> DomainAuthenticationService<'a> {
    /// Creates a new domain authentication service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Authenticates a domain.
    pub async fn create(
        &self,
        request: &CreateDomainAuthenticationRequest,
    ) -> SendGridResult<DomainAuthentication> {
        require(&request.domain, "domain is required")?;
        self.client.post("/whitelabel/domains", request).await
    }

    /// Gets an authenticated domain.
    pub async fn get(&self, id: &str) -> SendGridResult<DomainAuthentication> {
        require_id(id, "domain authentication ID is required")?;
        self.client
            .get(&format!("/whitelabel/domains/{}", id))
            .await
    }

    /// Lists authenticated domains.
    pub async fn list(&self) -> SendGridResult<Vec<DomainAuthentication>> {
        self.client.get("/whitelabel/domains").await
    }

    /// Updates an authenticated domain.
    pub async fn update(
        &self,
        id: &str,
        request: &UpdateDomainAuthenticationRequest,
    ) -> SendGridResult<DomainAuthentication> {
        require_id(id, "domain authentication ID is required")?;
        self.client
            .patch(&format!("/whitelabel/domains/{}", id), request)
            .await
    }

    /// Asks SendGrid to check the domain's DNS records.
    pub async fn validate(&self, id: &str) -> SendGridResult<DnsValidation> {
        require_id(id, "domain authentication ID is required")?;
        self.client
            .post(&format!("/whitelabel/domains/{}/validate", id), &serde_json::json!({}))
            .await
    }

    /// Deletes an authenticated domain.
    pub async fn delete(&self, id: &str) -> SendGridResult<bool> {
        require_id(id, "domain authentication ID is required")?;
        self.client
            .delete_idempotent(&format!("/whitelabel/domains/{}", id))
            .await
    }
}

/// A DNS record SendGrid expects to find.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DnsRecord {
    /// Record host.
    #[serde(deserialize_with = "nullable")]
    pub host: String,
    /// Record type, e.g. `cname` or `txt`.
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub record_type: String,
    /// Record value.
    #[serde(deserialize_with = "nullable")]
    pub data: String,
    /// Whether SendGrid found the record.
    #[serde(deserialize_with = "nullable")]
    pub valid: bool,
}

/// An authenticated sending domain.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DomainAuthentication {
    /// Domain ID.
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    /// Owning user ID.
    #[serde(deserialize_with = "nullable")]
    pub user_id: i64,
    /// Subdomain used for the records.
    #[serde(deserialize_with = "nullable")]
    pub subdomain: String,
    /// Root domain.
    #[serde(deserialize_with = "nullable")]
    pub domain: String,
    /// Username the domain belongs to.
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    /// Dedicated IPs.
    #[serde(deserialize_with = "nullable")]
    pub ips: Vec<String>,
    /// Custom SPF record in use.
    #[serde(deserialize_with = "nullable")]
    pub custom_spf: bool,
    /// Default domain for the account.
    #[serde(deserialize_with = "nullable")]
    pub default: bool,
    /// Legacy whitelabel.
    #[serde(deserialize_with = "nullable")]
    pub legacy: bool,
    /// SendGrid manages the SPF and DKIM records.
    #[serde(deserialize_with = "nullable")]
    pub automatic_security: bool,
    /// All records validated.
    #[serde(deserialize_with = "nullable")]
    pub valid: bool,
    /// Records keyed by purpose (`dkim1`, `mail_cname`, ...).
    #[serde(deserialize_with = "nullable")]
    pub dns: BTreeMap<String, DnsRecord>,
}

/// Fields for authenticating a domain.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDomainAuthenticationRequest {
    /// Root domain.
    pub domain: String,
    /// Subdomain for the records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    /// Assign to a subuser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Dedicated IPs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ips: Vec<String>,
    /// Use a custom SPF record.
    pub custom_spf: bool,
    /// Make this the default domain.
    pub default: bool,
    /// Let SendGrid manage SPF and DKIM.
    pub automatic_security: bool,
    /// Custom DKIM selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_dkim_selector: Option<String>,
}

/// Mutable fields of an authenticated domain.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDomainAuthenticationRequest {
    /// Make this the default domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    /// Use a custom SPF record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_spf: Option<bool>,
}

/// Outcome of a DNS validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DnsValidation {
    /// ID of the validated resource.
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    /// All records valid.
    #[serde(deserialize_with = "nullable")]
    pub valid: bool,
    /// Per-record results.
    #[serde(deserialize_with = "nullable")]
    pub validation_results: BTreeMap<String, RecordValidation>,
}

/// Validation result of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecordValidation {
    /// Record valid.
    #[serde(deserialize_with = "nullable")]
    pub valid: bool,
    /// Why the record failed.
    pub reason: Option<String>,
}
