//! Subuser operations.

use crate::client::SendGridClient;
use crate::errors::{SendGridError, SendGridResult};
use crate::services::{nullable, require, require_id};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Service for subuser operations.
pub struct SubusersService<'a> {
    client: &'a SendGridClient,
}

impl<'a> SubusersService<'a> {
    /// Creates a new subusers service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Creates a subuser.
    pub async fn create(&self, request: &CreateSubuserRequest) -> SendGridResult<Subuser> {
        require(&request.username, "username is required")?;
        require(&request.email, "email is required")?;
        require(&request.password, "password is required")?;
        if request.ips.iter().all(|ip| ip.trim().is_empty()) {
            return Err(SendGridError::missing_field("at least one IP address is required"));
        }

        self.client.post("/subusers", request).await
    }

    /// Gets a subuser by username.
    pub async fn get(&self, username: &str) -> SendGridResult<Subuser> {
        require_id(username, "username is required")?;

        let subusers: Vec<Subuser> = self
            .client
            .get_with_params("/subusers", &[("username", username)])
            .await?;
        subusers
            .into_iter()
            .find(|s| s.username == username)
            .ok_or_else(|| SendGridError::not_found(format!("subuser {} not found", username)))
    }

    /// Lists subusers.
    pub async fn list(&self) -> SendGridResult<Vec<Subuser>> {
        self.client.get("/subusers").await
    }

    /// Enables or disables a subuser.
    pub async fn set_disabled(&self, username: &str, disabled: bool) -> SendGridResult<()> {
        require_id(username, "username is required")?;
        self.client
            .patch_no_response(&format!("/subusers/{}", username), &DisabledRequest { disabled })
            .await
    }

    /// Replaces the IPs assigned to a subuser.
    pub async fn set_ips(&self, username: &str, ips: &[String]) -> SendGridResult<Vec<String>> {
        require_id(username, "username is required")?;
        if ips.is_empty() {
            return Err(SendGridError::missing_field("at least one IP address is required"));
        }
        let response: SubuserIps = self
            .client
            .put(&format!("/subusers/{}/ips", username), &ips)
            .await?;
        Ok(response.ips)
    }

    /// Changes a subuser's password.
    pub async fn update_password(&self, username: &str, new_password: &str) -> SendGridResult<()> {
        require_id(username, "username is required")?;
        require(new_password, "new password must not be empty")?;
        self.client
            .put_no_response(
                &format!("/subusers/{}/password", username),
                &PasswordRequest { new_password },
            )
            .await
    }

    /// Deletes a subuser.
    pub async fn delete(&self, username: &str) -> SendGridResult<bool> {
        require_id(username, "username is required")?;
        self.client
            .delete_idempotent(&format!("/subusers/{}", username))
            .await
    }
}

/// A SendGrid subuser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Subuser {
    /// User ID.
    #[serde(alias = "user_id", deserialize_with = "nullable")]
    pub id: i64,
    /// Username.
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    /// Email address.
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    /// Whether the subuser is disabled.
    #[serde(deserialize_with = "nullable")]
    pub disabled: bool,
}

/// Fields for creating a subuser.
#[derive(Clone, Serialize)]
pub struct CreateSubuserRequest {
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// IPs assigned to the subuser.
    pub ips: Vec<String>,
}

impl fmt::Debug for CreateSubuserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateSubuserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("ips", &self.ips)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct DisabledRequest {
    disabled: bool,
}

#[derive(Serialize)]
struct PasswordRequest<'a> {
    new_password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubuserIps {
    #[serde(deserialize_with = "nullable")]
    ips: Vec<String>,
}
