//! Scope validation and normalization.
//!
//! The catalog is built once and shared through the client, so callers never
//! consult a process-wide table.

mod catalog;

pub use catalog::{ASSIGNABLE_SCOPES, AUTOMATIC_SCOPES, SENDER_VERIFICATION_SCOPE};

use crate::errors::{SendGridError, SendGridErrorKind, SendGridResult};
use std::collections::{BTreeSet, HashSet};

/// Immutable sets of assignable and automatic scopes.
#[derive(Debug, Clone)]
pub struct ScopeCatalog {
    valid: HashSet<String>,
    automatic: HashSet<String>,
}

impl ScopeCatalog {
    /// Creates a catalog from explicit scope lists.
    pub fn new<V, A>(valid: V, automatic: A) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            valid: valid.into_iter().map(Into::into).collect(),
            automatic: automatic.into_iter().map(Into::into).collect(),
        }
    }

    /// The scopes published by SendGrid.
    pub fn sendgrid() -> Self {
        Self::new(
            ASSIGNABLE_SCOPES.iter().copied(),
            AUTOMATIC_SCOPES.iter().copied(),
        )
    }

    /// Returns true if the scope can be assigned.
    pub fn is_valid(&self, scope: &str) -> bool {
        self.valid.contains(scope)
    }

    /// Returns true if SendGrid sets the scope itself.
    pub fn is_automatic(&self, scope: &str) -> bool {
        self.automatic.contains(scope)
    }

    /// Checks that every scope is assignable.
    ///
    /// Automatic scopes and unknown scopes are reported separately in one
    /// [`SendGridErrorKind::InvalidScopes`] error.
    pub fn validate<S: AsRef<str>>(&self, scopes: &[S]) -> SendGridResult<()> {
        let mut automatic = Vec::new();
        let mut invalid = Vec::new();

        for scope in scopes.iter().map(AsRef::as_ref) {
            if self.is_automatic(scope) {
                automatic.push(scope);
            } else if !self.is_valid(scope) {
                invalid.push(scope);
            }
        }

        let mut problems = Vec::new();
        if !automatic.is_empty() {
            problems.push(format!(
                "the following scopes are set automatically by SendGrid and cannot be manually assigned: {}",
                automatic.join(", ")
            ));
        }
        if !invalid.is_empty() {
            problems.push(format!(
                "the following scopes are not valid or assignable: {}",
                invalid.join(", ")
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SendGridError::new(SendGridErrorKind::InvalidScopes, problems.join("; ")))
        }
    }

    /// Removes automatic scopes, keeping order.
    pub fn sanitize<S: AsRef<str>>(&self, scopes: &[S]) -> Vec<String> {
        scopes
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| !self.is_automatic(s))
            .map(String::from)
            .collect()
    }

    /// Scopes to send when creating an API key.
    ///
    /// SendGrid grants `sender_verification_eligible` to every key, so it is
    /// requested up front to keep the stored scope set stable.
    pub fn api_key_scopes<S: AsRef<str>>(&self, scopes: &[S]) -> Vec<String> {
        let mut result: Vec<String> = scopes.iter().map(|s| s.as_ref().to_string()).collect();
        if !result.iter().any(|s| s == SENDER_VERIFICATION_SCOPE) {
            result.push(SENDER_VERIFICATION_SCOPE.to_string());
        }
        result
    }

    /// Compares two scope lists ignoring order, duplicates, automatic scopes
    /// and the implicit sender verification scope.
    pub fn same_scopes<A: AsRef<str>, B: AsRef<str>>(&self, a: &[A], b: &[B]) -> bool {
        self.comparable(a) == self.comparable(b)
    }

    fn comparable<'s, S: AsRef<str>>(&self, scopes: &'s [S]) -> BTreeSet<&'s str> {
        scopes
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| !self.is_automatic(s) && *s != SENDER_VERIFICATION_SCOPE)
            .collect()
    }
}

impl Default for ScopeCatalog {
    fn default() -> Self {
        Self::sendgrid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_scopes_pass() {
        let catalog = ScopeCatalog::sendgrid();
        assert!(catalog.validate(&["mail.send", "templates.read"]).is_ok());
        assert!(catalog.validate::<&str>(&[]).is_ok());
    }

    #[test]
    fn test_automatic_scope_rejected() {
        let catalog = ScopeCatalog::sendgrid();
        let err = catalog.validate(&["mail.send", "2fa_required"]).unwrap_err();
        assert_eq!(*err.kind(), SendGridErrorKind::InvalidScopes);
        assert!(err.message().contains("set automatically by SendGrid"));
        assert!(err.message().contains("2fa_required"));
    }

    #[test]
    fn test_unknown_and_automatic_both_reported() {
        let catalog = ScopeCatalog::sendgrid();
        let err = catalog.validate(&["bogus.scope", "2fa_exempt"]).unwrap_err();
        assert!(err.message().contains("not valid or assignable: bogus.scope"));
        assert!(err.message().contains("2fa_exempt"));
    }

    #[test]
    fn test_sanitize_strips_automatic() {
        let catalog = ScopeCatalog::sendgrid();
        let scopes = vec![
            "2fa_exempt".to_string(),
            "mail.send".to_string(),
            "sender_verification_legacy".to_string(),
        ];
        assert_eq!(catalog.sanitize(&scopes), vec!["mail.send".to_string()]);
    }

    #[test]
    fn test_api_key_scopes_adds_sender_verification_once() {
        let catalog = ScopeCatalog::sendgrid();
        assert_eq!(
            catalog.api_key_scopes(&["mail.send"]),
            vec!["mail.send".to_string(), SENDER_VERIFICATION_SCOPE.to_string()]
        );
        assert_eq!(catalog.api_key_scopes(&[SENDER_VERIFICATION_SCOPE]).len(), 1);
    }

    #[test]
    fn test_same_scopes_is_order_insensitive() {
        let catalog = ScopeCatalog::sendgrid();
        assert!(catalog.same_scopes(
            &["templates.read", "mail.send"],
            &["mail.send", "2fa_required", "sender_verification_eligible", "templates.read"],
        ));
        assert!(!catalog.same_scopes(&["mail.send"], &["templates.read"]));
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = ScopeCatalog::new(["a.read"], ["auto"]);
        assert!(catalog.is_valid("a.read"));
        assert!(catalog.is_automatic("auto"));
        assert!(!catalog.is_valid("mail.send"));
    }
}
