//! # SendGrid Integration Library
//!
//! Client for managing SendGrid account resources:
//! - API keys, templates and template versions
//! - Teammates (including SSO and pending invites) and subusers
//! - Domain authentication and link branding with DNS validation
//! - SSO integrations and certificates
//! - Unsubscribe groups, the event webhook and inbound parse webhooks
//!
//! Every request goes through one transport that authenticates, normalizes
//! error bodies into [`SendGridError`] and records rate-limit headers.
//! Rate-limited (429) calls are retried with backoff until a deadline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_sendgrid::{Operation, SendGridClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SendGridClient::builder()
//!         .api_key("SG.xxxxxxxx")
//!         .build()?;
//!
//!     let scopes = vec!["mail.send".to_string()];
//!     let api_keys = client.api_keys();
//!     let key = client
//!         .with_retry(Operation::Create, || api_keys.create("deploy", &scopes))
//!         .await?;
//!     println!("created {}", key.id);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;

// Authentication
pub mod auth;

// HTTP client and transport
pub mod client;

// Rate-limit retries
pub mod resilience;

// Scope catalog
pub mod scopes;

// API Services
pub mod services;

// Observability
pub mod observability;

// Re-exports for convenience
pub use auth::{CredentialProvider, Credentials, EnvCredentialProvider, StaticCredentialProvider};
pub use client::{SendGridClient, SendGridClientBuilder};
pub use config::{Operation, OperationTimeouts, RetryConfig, SendGridConfig, SendGridConfigBuilder};
pub use errors::{RateLimitInfo, SendGridError, SendGridErrorKind, SendGridResult};
pub use resilience::{RetryPolicy, RetryState};
pub use scopes::ScopeCatalog;
pub use services::*;
