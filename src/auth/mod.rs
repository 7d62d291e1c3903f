//! Authentication for the Management API.
//!
//! Every request carries a bearer token. Where it comes from is decided by
//! [`Credentials`]:
//!
//! - [`ClientCredentialsConfig`]: a machine-to-machine application's client ID
//!   and secret, exchanged for a token and refreshed automatically
//!   (recommended).
//! - [`BearerCredentialsConfig`]: a token issued elsewhere, used as is.
//! - [`CredentialsProvider`]: a custom async token source.
//!
//! ```rust,ignore
//! use auth0_management::{Client, ClientCredentialsConfig};
//!
//! let client = Client::builder()
//!     .domain("example.eu.auth0.com")
//!     .credentials(ClientCredentialsConfig::new(client_id, client_secret))
//!     .build()
//!     .await?;
//! ```

mod credentials;
mod provider;
mod token;

pub use credentials::{BearerCredentialsConfig, ClientCredentialsConfig, Credentials};
pub use provider::{CredentialsFuture, CredentialsProvider};
pub(crate) use token::TokenManager;
