//! SendGrid API services, one per resource kind.

mod api_keys;
mod domain_authentication;
mod event_webhook;
mod link_branding;
mod parse_webhooks;
mod sso_certificates;
mod sso_integrations;
mod subusers;
mod teammates;
mod template_versions;
mod templates;
mod unsubscribe_groups;

pub use api_keys::*;
pub use domain_authentication::*;
pub use event_webhook::*;
pub use link_branding::*;
pub use parse_webhooks::*;
pub use sso_certificates::*;
pub use sso_integrations::*;
pub use subusers::*;
pub use teammates::*;
pub use template_versions::*;
pub use templates::*;
pub use unsubscribe_groups::*;

use crate::errors::{SendGridError, SendGridResult};
use serde::{Deserialize, Deserializer};

/// A `{"result": [...]}` list envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ResultList<T> {
    #[serde(default = "Vec::new", deserialize_with = "nullable")]
    pub result: Vec<T>,
}

/// Deserializes an explicit `null` as the type's default.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fails with a precondition error when `value` is blank.
pub(crate) fn require(value: &str, message: &str) -> SendGridResult<()> {
    if value.trim().is_empty() {
        Err(SendGridError::missing_field(message))
    } else {
        Ok(())
    }
}

/// Fails unless `value` can be used as a single URL path segment.
///
/// Blank values, `.`, `..` and values containing a slash, backslash, `?`,
/// `#` or `%` are rejected before any request is built.
pub(crate) fn require_id(value: &str, message: &str) -> SendGridResult<()> {
    require(value, message)?;
    if value == "." || value == ".." || value.contains(['/', '\\', '?', '#', '%']) {
        return Err(SendGridError::invalid_identifier(format!(
            "{:?} is not a valid identifier",
            value
        )));
    }
    Ok(())
}

/// A warning SendGrid attaches to template responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Warning {
    /// Warning text.
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
}
