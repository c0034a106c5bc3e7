//! Transactional template operations.

use crate::client::SendGridClient;
use crate::errors::SendGridResult;
use crate::services::{nullable, require, require_id, ResultList, TemplateVersion, Warning};
use serde::{Deserialize, Serialize};

/// Largest page SendGrid serves for template listings.
const TEMPLATE_PAGE_SIZE: u32 = 200;

/// Service for template operations.
pub struct TemplatesService<'a> {
    client: &'a SendGridClient,
}

impl<'a> TemplatesService<'a> {
    /// Creates a new templates service.
    pub fn new(client: &'a SendGridClient) -> Self {
        Self { client }
    }

    /// Creates a template.
    pub async fn create(
        &self,
        name: &str,
        generation: TemplateGeneration,
    ) -> SendGridResult<Template> {
        require(name, "template name is required")?;
        let request = CreateTemplateRequest { name, generation };
        self.client.post("/templates", &request).await
    }

    /// Gets a template, including its versions.
    pub async fn get(&self, id: &str) -> SendGridResult<Template> {
        require_id(id, "template ID is required")?;
        self.client.get(&format!("/templates/{}", id)).await
    }

    /// Lists templates of one generation.
    pub async fn list(&self, generation: TemplateGeneration) -> SendGridResult<Vec<Template>> {
        let params = ListTemplatesParams {
            generations: generation,
            page_size: TEMPLATE_PAGE_SIZE,
        };
        let response: ResultList<Template> =
            self.client.get_with_params("/templates", &params).await?;
        Ok(response.result)
    }

    /// Renames a template.
    pub async fn update(&self, id: &str, name: &str) -> SendGridResult<Template> {
        require_id(id, "template ID is required")?;
        require(name, "template name is required")?;
        self.client
            .patch(&format!("/templates/{}", id), &UpdateTemplateRequest { name })
            .await
    }

    /// Deletes a template.
    pub async fn delete(&self, id: &str) -> SendGridResult<bool> {
        require_id(id, "template ID is required")?;
        self.client
            .delete_idempotent(&format!("/templates/{}", id))
            .await
    }
}

/// Template generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateGeneration {
    /// Legacy substitution templates.
    Legacy,
    /// Handlebars templates.
    #[default]
    Dynamic,
}

/// Transactional template.
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    /// Template ID.
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    /// Template name.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Template generation.
    #[serde(default, deserialize_with = "nullable")]
    pub generation: TemplateGeneration,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Versions of the template.
    #[serde(default, deserialize_with = "nullable")]
    pub versions: Vec<TemplateVersion>,
    /// Warning attached by SendGrid.
    #[serde(default)]
    pub warning: Option<Warning>,
}

impl Template {
    /// Gets the active version, if any.
    pub fn active_version(&self) -> Option<&TemplateVersion> {
        self.versions.iter().find(|v| v.is_active())
    }
}

#[derive(Debug, Serialize)]
struct CreateTemplateRequest<'a> {
    name: &'a str,
    generation: TemplateGeneration,
}

#[derive(Debug, Serialize)]
struct UpdateTemplateRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct ListTemplatesParams {
    generations: TemplateGeneration,
    page_size: u32,
}
