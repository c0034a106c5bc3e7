//! Template version operations.

use crate::client::SendGridClient;
use crate::errors::{SendGridError, SendGridResult};
use crate::services::{nullable, require, require_id, Warning};
use serde::{Deserialize, Serialize};

/// Service for template version operations.
pub struct TemplateVersionsService<'a> {
    client: &'a SendGridClient,
}

impl<'a> TemplateVersionsService<'a> {
    /// Creates a new template versions service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Creates a version of a template.
    pub async fn create(
        &self,
        template_id: &str,
        request: &TemplateVersionRequest,
    ) -> SendGridResult<TemplateVersion> {
        require_id(template_id, "template_id is required")?;
        require(&request.name, "name is required")?;
        require(&request.subject, "subject is required")?;

        self.client
            .post(&format!("/templates/{}/versions", template_id), request)
            .await
    }

    /// Gets a template version.
    pub async fn get(&self, template_id: &str, id: &str) -> SendGridResult<TemplateVersion> {
        require_id(template_id, "template_id is required")?;
        require_id(id, "template version ID is required")?;
        self.client
            .get(&format!("/templates/{}/versions/{}", template_id, id))
            .await
    }

    /// Updates a template version.
    pub async fn update(
        &self,
        template_id: &str,
        id: &str,
        request: &TemplateVersionRequest,
    ) -> SendGridResult<TemplateVersion> {
        require_id(template_id, "template_id is required")?;
        require_id(id, "template version ID is required")?;
        require(&request.name, "name is required")?;
        require(&request.subject, "subject is required")?;

        self.client
            .patch(&format!("/templates/{}/versions/{}", template_id, id), request)
            .await
    }

    /// Makes a version the active one of its template.
    pub async fn activate(&self, template_id: &str, id: &str) -> SendGridResult<TemplateVersion> {
        require_id(template_id, "template_id is required")?;
        require_id(id, "template version ID is required")?;
        self.client
            .post(
                &format!("/templates/{}/versions/{}/activate", template_id, id),
                &serde_json::json!({}),
            )
            .await
    }

    /// Gets the active version of a template.
    pub async fn active(&self, template_id: &str) -> SendGridResult<TemplateVersion> {
        let template = self.client.templates().get(template_id).await?;
        template.active_version().cloned().ok_or_else(|| {
            SendGridError::not_found(format!("template {} has no active version", template_id))
        })
    }

    /// Deletes a template version.
    pub async fn delete(&self, template_id: &str, id: &str) -> SendGridResult<bool> {
        require_id(template_id, "template_id is required")?;
        require_id(id, "template version ID is required")?;
        self.client
            .delete_idempotent(&format!("/templates/{}/versions/{}", template_id, id))
            .await
    }
}

/// Template editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Editor {
    /// Raw HTML editor.
    #[default]
    Code,
    /// Drag and drop editor.
    Design,
}

/// Template version as returned by SendGrid.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateVersion {
    /// Version ID.
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    /// Owning template ID.
    #[serde(default, deserialize_with = "nullable")]
    pub template_id: String,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Preview image URL.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Warnings attached by SendGrid.
    #[serde(default, deserialize_with = "nullable")]
    pub warnings: Vec<Warning>,
    /// 1 when this is the active version.
    #[serde(default, deserialize_with = "nullable")]
    pub active: i32,
    /// Version name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// HTML body.
    #[serde(default)]
    pub html_content: Option<String>,
    /// Plain text body.
    #[serde(default)]
    pub plain_content: Option<String>,
    /// Whether plain content is derived from the HTML.
    #[serde(default, deserialize_with = "nullable")]
    pub generate_plain_content: bool,
    /// Subject line.
    #[serde(default, deserialize_with = "nullable")]
    pub subject: String,
    /// Editor used.
    #[serde(default, deserialize_with = "nullable")]
    pub editor: Editor,
    /// Sample data for previews, as JSON text.
    #[serde(default)]
    pub test_data: Option<String>,
}

impl TemplateVersion {
    /// Returns true if this is the active version.
    pub fn is_active(&self) -> bool {
        self.active == 1
    }
}

/// Fields for creating or updating a template version.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateVersionRequest {
    /// Version name.
    pub name: String,
    /// Subject line.
    pub subject: String,
    /// 1 to make the version active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<i32>,
    /// HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    /// Plain text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_content: Option<String>,
    /// Derive the plain body from the HTML.
    pub generate_plain_content: bool,
    /// Editor.
    pub editor: Editor,
    /// Sample data for previews, as JSON text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
}

impl TemplateVersionRequest {
    /// Creates a request with the required fields.
    pub fn new(name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            generate_plain_content: true,
            ..Default::default()
        }
    }

    /// Sets the HTML body.
    pub fn html_content(mut self, html: impl Into<String>) -> Self {
        self.html_content = Some(html.into());
        self
    }

    /// Marks the version active.
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(i32::from(active));
        self
    }
}
