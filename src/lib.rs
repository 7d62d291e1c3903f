//! # Auth0 Management API client
//!
//! Rust client for the Auth0 Management API v2, covering Guardian
//! (multi-factor authentication) configuration and Hooks.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use auth0_management::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::builder()
//!         .domain("example.eu.auth0.com")
//!         .credentials(ClientCredentialsConfig::new("client-id", "client-secret"))
//!         .build()
//!         .await?;
//!
//!     // Require MFA for every login
//!     client
//!         .guardian()
//!         .multi_factor()
//!         .update_policy([MultiFactorPolicy::AllApplications].into())
//!         .await?;
//!
//!     // Make a hook's secrets exactly this set
//!     client
//!         .hooks()
//!         .replace_secrets("01HOOK", &HookSecrets::from([("API_KEY", "k-123")]))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Client Hierarchy**: `Client` → `GuardianClient` → `MultiFactorClient` →
//!   per-factor clients; `Client` → `HooksClient`
//! - **One call, one request**: every method performs a single HTTP call,
//!   except `replace_secrets` and `remove_all_secrets`, which read the
//!   current secrets first
//! - **Secrets are write-only**: values read back are `_VALUE_NOT_SHOWN_`
//!
//! ## Features
//!
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)
//! - `tracing` (default): Emit request, retry and token refresh events
//! - `integration-tests`: Build the live-tenant test suite

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod error;

// Management API resources
pub mod guardian;
pub mod hooks;

pub(crate) mod user_agent;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorKind, Result};
pub use guardian::GuardianClient;
pub use hooks::{CreateHookRequest, Hook, HookList, HookSecrets, HooksClient, UpdateHookRequest};

// Re-export auth types
pub use auth::{BearerCredentialsConfig, ClientCredentialsConfig, Credentials, CredentialsProvider};

// Re-export config types
pub use config::{RetryConfig, TlsConfig};
