//! The Management API client.
//!
//! [`Client`] owns the connection pool and the token cache. Resource clients
//! are cheap views over it:
//!
//! - [`Client::guardian()`] → [`GuardianClient`]: MFA factors, policies and
//!   enrollments
//! - [`Client::hooks()`] → [`HooksClient`]: hooks and their secrets
//!
//! ```rust,ignore
//! use auth0_management::prelude::*;
//!
//! let client = Client::from_env().await?;
//!
//! client.guardian().multi_factor().otp().enable(true).await?;
//! let hooks = client.hooks().list().await?;
//! ```

mod builder;
mod inner;

pub use builder::{ClientBuilder, HasCredentials, HasUrl, NoCredentials, NoUrl};

use std::sync::Arc;

use crate::Error;
use crate::auth::{BearerCredentialsConfig, ClientCredentialsConfig, Credentials};
use crate::guardian::GuardianClient;
use crate::hooks::HooksClient;

/// Environment variable holding the tenant domain.
pub const ENV_DOMAIN: &str = "AUTH0_DOMAIN";
/// Environment variable holding a pre-issued management token.
pub const ENV_TOKEN: &str = "AUTH0_TOKEN";
/// Environment variable holding the machine-to-machine client ID.
pub const ENV_CLIENT_ID: &str = "AUTH0_CLIENT_ID";
/// Environment variable holding the machine-to-machine client secret.
pub const ENV_CLIENT_SECRET: &str = "AUTH0_CLIENT_SECRET";
/// Environment variable overriding the token audience.
pub const ENV_AUDIENCE: &str = "AUTH0_AUDIENCE";

/// The Management API client.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Clones share the HTTP connection pool
/// and the cached management token.
///
/// ## Example
///
/// ```rust,ignore
/// use auth0_management::{Client, ClientCredentialsConfig};
///
/// let client = Client::builder()
///     .domain("example.eu.auth0.com")
///     .credentials(ClientCredentialsConfig::new(client_id, client_secret))
///     .build()
///     .await?;
///
/// let factors = client.guardian().multi_factor().list().await?;
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder<NoUrl, NoCredentials> {
        ClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `AUTH0_DOMAIN`, then `AUTH0_TOKEN` if set, otherwise
    /// `AUTH0_CLIENT_ID` and `AUTH0_CLIENT_SECRET` (with an optional
    /// `AUTH0_AUDIENCE`).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the domain or both kinds of
    /// credentials are missing.
    pub async fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok()).await
    }

    async fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let domain = var(ENV_DOMAIN)
            .ok_or_else(|| Error::configuration(format!("{} is not set", ENV_DOMAIN)))?;

        let token = var(ENV_TOKEN);
        let client_id = var(ENV_CLIENT_ID);
        let client_secret = var(ENV_CLIENT_SECRET);

        let credentials: Credentials = match (token, client_id, client_secret) {
            (Some(token), _, _) => BearerCredentialsConfig::new(token).into(),
            (None, Some(id), Some(secret)) => {
                let mut config = ClientCredentialsConfig::new(id, secret);
                if let Some(audience) = var(ENV_AUDIENCE) {
                    config = config.with_audience(audience);
                }
                config.into()
            }
            _ => {
                return Err(Error::configuration(format!(
                    "set {} or both {} and {}",
                    ENV_TOKEN, ENV_CLIENT_ID, ENV_CLIENT_SECRET
                )));
            }
        };

        let builder = if domain.contains("://") {
            Client::builder().url(domain)
        } else {
            Client::builder().domain(domain)
        };
        builder.credentials(credentials).build().await
    }

    /// Returns the Guardian (multi-factor authentication) client.
    pub fn guardian(&self) -> GuardianClient {
        GuardianClient::new(self.clone())
    }

    /// Returns the hooks client.
    pub fn hooks(&self) -> HooksClient {
        HooksClient::new(self.clone())
    }

    /// Returns the tenant URL.
    pub fn url(&self) -> &str {
        self.inner.url.as_str()
    }

    /// Creates a client from the inner implementation.
    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns a reference to the inner client.
    pub(crate) fn inner(&self) -> &inner::ClientInner {
        &self.inner
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.inner.url.as_str())
            .field("credentials", self.inner.tokens.credentials())
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::ErrorKind;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn test_from_env_with_token() {
        let client = Client::from_lookup(lookup(&[
            (ENV_DOMAIN, "example.auth0.com"),
            (ENV_TOKEN, "tok"),
        ]))
        .await
        .unwrap();

        assert_eq!(client.url(), "https://example.auth0.com/");
        assert!(client.inner().tokens.credentials().is_bearer());
    }

    #[tokio::test]
    async fn test_from_env_with_client_credentials() {
        let client = Client::from_lookup(lookup(&[
            (ENV_DOMAIN, "https://example.auth0.com"),
            (ENV_CLIENT_ID, "id"),
            (ENV_CLIENT_SECRET, "secret"),
        ]))
        .await
        .unwrap();

        assert!(client.inner().tokens.credentials().is_client_credentials());
    }

    #[tokio::test]
    async fn test_from_env_missing_domain() {
        let err = Client::from_lookup(lookup(&[(ENV_TOKEN, "tok")]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains(ENV_DOMAIN));
    }

    #[tokio::test]
    async fn test_from_env_missing_credentials() {
        let err = Client::from_lookup(lookup(&[
            (ENV_DOMAIN, "example.auth0.com"),
            (ENV_CLIENT_ID, "id"),
        ]))
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_client_debug_redacts_token() {
        let client = Client::from_lookup(lookup(&[
            (ENV_DOMAIN, "example.auth0.com"),
            (ENV_TOKEN, "super-secret"),
        ]))
        .await
        .unwrap();

        let debug = format!("{:?}", client);
        assert!(debug.contains("example.auth0.com"));
        assert!(!debug.contains("super-secret"));
    }
}
