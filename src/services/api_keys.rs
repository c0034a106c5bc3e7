//! API key operations.

use crate::client::SendGridClient;
use crate::errors::SendGridResult;
use crate::services::{nullable, require, require_id, ResultList};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Service for API key operations.
pub struct ApiKeysService<'a> {
    client: &'a SendGridClient,
}

impl<'a> ApiKeysService<'a> {
    /// Creates a new API keys service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Creates an API key.
    ///
    /// An empty scope list creates a full-access key. Otherwise the sender
    /// verification scope SendGrid grants every key is requested as well.
    pub async fn create(&self, name: &str, scopes: &[String]) -> SendGridResult<ApiKey> {
        require(name, "name is required")?;

        let scopes = if scopes.is_empty() {
            Vec::new()
        } else {
            self.client.scope_catalog().api_key_scopes(scopes)
        };
        let request = ApiKeyRequest { name, scopes };
        self.client.post("/api_keys", &request).await
    }

    /// Gets an API key.
    pub async fn get(&self, id: &str) -> SendGridResult<ApiKey> {
        require_id(id, "API key ID is required")?;
        self.client.get(&format!("/api_keys/{}", id)).await
    }

    /// Lists API keys.
    pub async fn list(&self) -> SendGridResult<Vec<ApiKey>> {
        let response: ResultList<ApiKey> = self.client.get("/api_keys").await?;
        Ok(response.result)
    }

    /// Updates an API key.
    ///
    /// With `scopes` the key is replaced (`PUT`); without, only the name changes.
    pub async fn update(
        &self,
        id: &str,
        name: &str,
        scopes: Option<&[String]>,
    ) -> SendGridResult<ApiKey> {
        require_id(id, "API key ID is required")?;
        require(name, "name is required")?;

        let path = format!("/api_keys/{}", id);
        match scopes {
            Some(scopes) => {
                let request = ApiKeyRequest {
                    name,
                    scopes: self.client.scope_catalog().api_key_scopes(scopes),
                };
                self.client.put(&path, &request).await
            }
            None => {
                let request = ApiKeyRequest {
                    name,
                    scopes: Vec::new(),
                };
                self.client.patch(&path, &request).await
            }
        }
    }

    /// Deletes an API key.
    pub async fn delete(&self, id: &str) -> SendGridResult<bool> {
        require_id(id, "API key ID is required")?;
        self.client
            .delete_idempotent(&format!("/api_keys/{}", id))
            .await
    }
}

/// SendGrid API key.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKey {
    /// Key ID.
    #[serde(rename = "api_key_id", deserialize_with = "nullable")]
    pub id: String,
    /// Key name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Granted scopes.
    #[serde(default, deserialize_with = "nullable")]
    pub scopes: Vec<String>,
    /// Secret value, only returned on creation.
    #[serde(default, rename = "api_key")]
    secret: Option<SecretString>,
}

impl ApiKey {
    /// Gets the secret key value when the response carried one.
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_ref().map(|s| s.expose_secret().as_str())
    }
}

#[derive(Debug, Serialize)]
struct ApiKeyRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    scopes: Vec<String>,
}
