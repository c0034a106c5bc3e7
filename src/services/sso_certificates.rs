//! SSO certificate operations.

use crate::client::SendGridClient;
use crate::errors::SendGridResult;
use crate::services::{nullable, require, require_id};
use serde::{Deserialize, Serialize};

/// Service for SSO certificate operations.
pub struct SsoCertificatesService<'a> {
    client: &'a SendGridClient,
}

impl<'a> SsoCertificatesService<'a> {
    /// Creates a new SSO certificates service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Uploads an IdP certificate.
    pub async fn create(&self, request: &SsoCertificateRequest) -> SendGridResult<SsoCertificate> {
        request.check()?;
        self.client.post("/sso/certificates", request).await
    }

    /// Gets a certificate.
    pub async fn get(&self, id: &str) -> SendGridResult<SsoCertificate> {
        require_id(id, "SSO certificate ID is required")?;
        self.client.get(&format!("/sso/certificates/{}", id)).await
    }

    /// Lists all certificates.
    pub async fn list(&self) -> SendGridResult<Vec<SsoCertificate>> {
        self.client.get("/sso/certificates").await
    }

    /// Lists the certificates of an integration.
    pub async fn list_for_integration(
        &self,
        integration_id: &str,
    ) -> SendGridResult<Vec<SsoCertificate>> {
        require_id(integration_id, "integration_id is required")?;
        self.client
            .get(&format!("/sso/integrations/{}/certificates", integration_id))
            .await
    }

    /// Updates a certificate.
    pub async fn update(
        &self,
        id: &str,
        request: &SsoCertificateRequest,
    ) -> SendGridResult<SsoCertificate> {
        require_id(id, "SSO certificate ID is required")?;
        request.check()?;
        self.client
            .patch(&format!("/sso/certificates/{}", id), request)
            .await
    }

    /// Deletes a certificate.
    pub async fn delete(&self, id: &str) -> SendGridResult<bool> {
        require_id(id, "SSO certificate ID is required")?;
        self.client
            .delete_idempotent(&format!("/sso/certificates/{}", id))
            .await
    }
}

/// An IdP signing certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SsoCertificate {
    /// Certificate ID.
    #[serde(deserialize_with = "nullable")]
    pub id: i32,
    /// PEM encoded certificate.
    #[serde(deserialize_with = "nullable")]
    pub public_certificate: String,
    /// Owning integration.
    #[serde(deserialize_with = "nullable")]
    pub integration_id: String,
    /// Validity start as a unix timestamp.
    #[serde(deserialize_with = "nullable")]
    pub not_before: i64,
    /// Validity end as a unix timestamp.
    #[serde(deserialize_with = "nullable")]
    pub not_after: i64,
}

/// Fields for uploading or replacing a certificate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SsoCertificateRequest {
    /// PEM encoded certificate.
    pub public_certificate: String,
    /// Owning integration.
    pub integration_id: String,
    /// Certificate enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl SsoCertificateRequest {
    fn check(&self) -> SendGridResult<()> {
        require(&self.public_certificate, "public_certificate is required")?;
        require(&self.integration_id, "integration_id is required")
    }
}
