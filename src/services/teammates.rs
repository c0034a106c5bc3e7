//! Teammate operations.
//!
//! SendGrid addresses teammates by username, while configurations know them
//! by email. Every lookup lists the full teammate collection and scans it;
//! nothing is cached between calls, so a renamed or re-invited teammate is
//! always resolved against current data.

use crate::client::SendGridClient;
use crate::errors::{SendGridError, SendGridResult};
use crate::services::{nullable, require, require_id, ResultList};
use serde::{Deserialize, Serialize};

/// Page size large enough to fetch every teammate in one call.
const LIST_LIMIT: u32 = 10_000;

/// `user_type` reported for invitations that were not accepted yet.
pub const PENDING_USER_TYPE: &str = "pending";

/// Service for teammate operations.
pub struct TeammatesService<'a> {
    client: &'a SendGridClient,
}

impl<'a> TeammatesService<'a> {
    /// Creates a new teammates service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Lists active teammates.
    pub async fn list(&self) -> SendGridResult<Vec<Teammate>> {
        let response: ResultList<Teammate> = self
            .client
            .get_with_params("/teammates", &LimitParams { limit: LIST_LIMIT })
            .await?;
        Ok(response.result)
    }

    /// Lists pending invitations.
    pub async fn list_pending(&self) -> SendGridResult<Vec<PendingTeammate>> {
        let response: ResultList<PendingTeammate> = self
            .client
            .get_with_params("/teammates/pending", &LimitParams { limit: LIST_LIMIT })
            .await?;
        Ok(response.result)
    }

    /// Resolves a teammate's username from their email.
    ///
    /// Fails with a 404 error when no active teammate has that email.
    pub async fn username_by_email(&self, email: &str) -> SendGridResult<String> {
        require(email, "email is required")?;

        self.list()
            .await?
            .into_iter()
            .find(|t| t.email == email && !t.username.is_empty())
            .map(|t| t.username)
            .ok_or_else(|| {
                SendGridError::not_found(format!("username with email {} not found", email))
            })
    }

    /// Invites a teammate.
    pub async fn invite(
        &self,
        email: &str,
        is_admin: bool,
        scopes: &[String],
    ) -> SendGridResult<Teammate> {
        require(email, "email is required")?;
        let scopes = self.assignable_scopes(is_admin, scopes)?;

        let request = InviteRequest {
            email,
            is_admin,
            scopes,
        };
        self.client.post("/teammates", &request).await
    }

    /// Creates an SSO teammate.
    pub async fn create_sso(&self, request: &SsoTeammateRequest) -> SendGridResult<Teammate> {
        require(&request.email, "email is required")?;
        require(&request.first_name, "first_name is required")?;
        require(&request.last_name, "last_name is required")?;
        let scopes = self.assignable_scopes(request.is_admin, &request.scopes)?;

        let body = SsoTeammateRequest {
            scopes,
            ..request.clone()
        };
        self.client.post("/sso/teammates", &body).await
    }

    /// Gets a teammate by username.
    pub async fn get(&self, username: &str) -> SendGridResult<Teammate> {
        require_id(username, "username is required")?;
        self.client.get(&format!("/teammates/{}", username)).await
    }

    /// Reads a teammate by email.
    ///
    /// Falls back to pending invitations, which come back with `user_type`
    /// set to `"pending"`. Scopes are normalized for comparison with
    /// configuration: automatic scopes removed, sorted, and cleared for
    /// admins.
    pub async fn read(&self, email: &str) -> SendGridResult<Teammate> {
        let teammate = match self.username_by_email(email).await {
            Ok(username) => self.get(&username).await?,
            Err(e) if e.is_not_found() => match self.find_pending(email).await? {
                Some(pending) => pending.into_teammate(),
                None => return Err(e),
            },
            Err(e) => return Err(e),
        };
        Ok(self.normalize(teammate))
    }

    /// Updates a teammate's admin flag and scopes.
    pub async fn update(
        &self,
        email: &str,
        is_admin: bool,
        scopes: &[String],
    ) -> SendGridResult<Teammate> {
        let scopes = self.assignable_scopes(is_admin, scopes)?;
        let username = self.resolve_for_update(email).await?;

        let request = UpdateRequest { is_admin, scopes };
        let teammate = self
            .client
            .patch(&format!("/teammates/{}", username), &request)
            .await?;
        Ok(self.normalize(teammate))
    }

    /// Updates an SSO teammate.
    pub async fn update_sso(&self, request: &SsoTeammateRequest) -> SendGridResult<Teammate> {
        let scopes = self.assignable_scopes(request.is_admin, &request.scopes)?;
        let username = self.resolve_for_update(&request.email).await?;

        let body = SsoUpdateRequest {
            first_name: &request.first_name,
            last_name: &request.last_name,
            is_admin: request.is_admin,
            scopes,
        };
        let teammate = self
            .client
            .patch(&format!("/sso/teammates/{}", username), &body)
            .await?;
        Ok(self.normalize(teammate))
    }

    /// Removes a teammate or revokes their pending invitation.
    pub async fn delete(&self, email: &str) -> SendGridResult<bool> {
        match self.username_by_email(email).await {
            Ok(username) => {
                require_id(&username, "username is required")?;
                self.client
                    .delete_idempotent(&format!("/teammates/{}", username))
                    .await
            }
            Err(e) if e.is_not_found() => match self.find_pending(email).await? {
                Some(pending) => match pending.token() {
                    Some(token) => {
                        require_id(token, "invitation token is required")?;
                        self.client
                            .delete_idempotent(&format!("/teammates/pending/{}", token))
                            .await
                    }
                    None => Err(SendGridError::missing_field(format!(
                        "pending invitation for {} has no token",
                        email
                    ))),
                },
                None => Ok(true),
            },
            Err(e) => Err(e),
        }
    }

    async fn find_pending(&self, email: &str) -> SendGridResult<Option<PendingTeammate>> {
        Ok(self.list_pending().await?.into_iter().find(|p| p.email == email))
    }

    async fn resolve_for_update(&self, email: &str) -> SendGridResult<String> {
        match self.username_by_email(email).await {
            Ok(username) => {
                require_id(&username, "username is required")?;
                Ok(username)
            }
            Err(e) if e.is_not_found() => {
                if self.find_pending(email).await?.is_some() {
                    Err(SendGridError::not_found(format!(
                        "teammate {} has not accepted the invitation yet and cannot be updated",
                        email
                    )))
                } else {
                    Err(e)
                }
            }
            Err(e) => Err(e),
        }
    }

    fn assignable_scopes(&self, is_admin: bool, scopes: &[String]) -> SendGridResult<Vec<String>> {
        if is_admin {
            return Ok(Vec::new());
        }
        let catalog = self.client.scope_catalog();
        catalog.validate(scopes)?;
        Ok(catalog.sanitize(scopes))
    }

    fn normalize(&self, mut teammate: Teammate) -> Teammate {
        if teammate.is_admin {
            teammate.scopes.clear();
        } else {
            teammate.scopes = self.client.scope_catalog().sanitize(&teammate.scopes);
            teammate.scopes.sort();
        }
        teammate
    }
}

/// A teammate of the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Teammate {
    /// Username, empty for pending invitations.
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    /// Email address.
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    /// First name.
    #[serde(deserialize_with = "nullable")]
    pub first_name: String,
    /// Last name.
    #[serde(deserialize_with = "nullable")]
    pub last_name: String,
    /// Street address.
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    /// Second address line.
    #[serde(deserialize_with = "nullable")]
    pub address2: String,
    /// City.
    #[serde(deserialize_with = "nullable")]
    pub city: String,
    /// State.
    #[serde(deserialize_with = "nullable")]
    pub state: String,
    /// Postal code.
    #[serde(deserialize_with = "nullable")]
    pub zip: String,
    /// Country.
    #[serde(deserialize_with = "nullable")]
    pub country: String,
    /// Company.
    #[serde(deserialize_with = "nullable")]
    pub company: String,
    /// Website.
    #[serde(deserialize_with = "nullable")]
    pub website: String,
    /// Phone.
    #[serde(deserialize_with = "nullable")]
    pub phone: String,
    /// Admin teammates hold every scope.
    #[serde(deserialize_with = "nullable")]
    pub is_admin: bool,
    /// Signs in through SSO.
    #[serde(deserialize_with = "nullable")]
    pub is_sso: bool,
    /// `owner`, `admin`, `teammate` or `pending`.
    #[serde(deserialize_with = "nullable")]
    pub user_type: String,
    /// Granted scopes.
    #[serde(deserialize_with = "nullable")]
    pub scopes: Vec<String>,
}

impl Teammate {
    /// Returns true for an invitation that was not accepted yet.
    pub fn is_pending(&self) -> bool {
        self.user_type == PENDING_USER_TYPE
    }
}

/// A pending teammate invitation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PendingTeammate {
    /// Invitation ID.
    #[serde(deserialize_with = "nullable")]
    pub pending_id: String,
    /// Invitation token.
    #[serde(deserialize_with = "nullable")]
    pub token: String,
    /// Invited email.
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    /// Admin invitation.
    #[serde(deserialize_with = "nullable")]
    pub is_admin: bool,
    /// Read-only invitation.
    #[serde(deserialize_with = "nullable")]
    pub is_read_only: bool,
    /// Expiry as a unix timestamp.
    #[serde(deserialize_with = "nullable")]
    pub expiration_date: i64,
    /// Offered scopes.
    #[serde(deserialize_with = "nullable")]
    pub scopes: Vec<String>,
}

impl PendingTeammate {
    /// Token identifying the invitation, falling back to its ID.
    pub fn token(&self) -> Option<&str> {
        [self.token.as_str(), self.pending_id.as_str()]
            .into_iter()
            .find(|t| !t.is_empty())
    }

    fn into_teammate(self) -> Teammate {
        Teammate {
            email: self.email,
            is_admin: self.is_admin,
            scopes: self.scopes,
            user_type: PENDING_USER_TYPE.to_string(),
            ..Default::default()
        }
    }
}

/// Fields for creating or updating an SSO teammate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SsoTeammateRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Admin teammate.
    pub is_admin: bool,
    /// Scopes, ignored for admins.
    pub scopes: Vec<String>,
}

#[derive(Debug, Serialize)]
struct LimitParams {
    limit: u32,
}

#[derive(Debug, Serialize)]
struct InviteRequest<'a> {
    email: &'a str,
    is_admin: bool,
    scopes: Vec<String>,
}

#[derive(Debug, Serialize)]
struct UpdateRequest {
    is_admin: bool,
    scopes: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SsoUpdateRequest<'a> {
    first_name: &'a str,
    last_name: &'a str,
    is_admin: bool,
    scopes: Vec<String>,
}
