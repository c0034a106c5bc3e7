//! Unsubscribe (suppression) group operations.

use crate::client::SendGridClient;
use crate::errors::SendGridResult;
use crate::services::{nullable, require, require_id};
use serde::{Deserialize, Serialize};

/// Service for unsubscribe group operations.
pub struct UnsubscribeGroupsService<'a> {
    client: &'a SendGridClient,
}

impl<'a> UnsubscribeGroupsService<'a> {
    /// Creates a new unsubscribe groups service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Creates a group.
    pub async fn create(
        &self,
        request: &UnsubscribeGroupRequest,
    ) -> SendGridResult<UnsubscribeGroup> {
        require(&request.name, "name is required")?;
        self.client.post("/asm/groups", request).await
    }

    /// Gets a group.
    pub async fn get(&self, id: &str) -> SendGridResult<UnsubscribeGroup> {
        require_id(id, "unsubscribe group ID is required")?;
        self.client.get(&format!("/asm/groups/{}", id)).await
    }

    /// Lists groups.
    pub async fn list(&self) -> SendGridResult<Vec<UnsubscribeGroup>> {
        self.client.get("/asm/groups").await
    }

    /// Updates a group.
    pub async fn update(
        &self,
        id: &str,
        request: &UnsubscribeGroupRequest,
    ) -> SendGridResult<UnsubscribeGroup> {
        require_id(id, "unsubscribe group ID is required")?;
        require(&request.name, "name is required")?;
        self.client
            .patch(&format!("/asm/groups/{}", id), request)
            .await
    }

    /// Deletes a group.
    pub async fn delete(&self, id: &str) -> SendGridResult<bool> {
        require_id(id, "unsubscribe group ID is required")?;
        self.client
            .delete_idempotent(&format!("/asm/groups/{}", id))
            .await
    }
}

/// A suppression group recipients can unsubscribe from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UnsubscribeGroup {
    /// Group ID.
    #[serde(deserialize_with = "nullable")]
    pub id: i32,
    /// Group name.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Description shown to recipients.
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    /// Default group for the account.
    #[serde(deserialize_with = "nullable")]
    pub is_default: bool,
    /// Number of unsubscribed addresses.
    #[serde(deserialize_with = "nullable")]
    pub unsubscribes: i32,
}

/// Fields for creating or updating a group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnsubscribeGroupRequest {
    /// Group name.
    pub name: String,
    /// Description shown to recipients.
    pub description: String,
    /// Default group for the account.
    pub is_default: bool,
}
