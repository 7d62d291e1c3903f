//! Credentials types for Management API authentication.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use super::CredentialsProvider;

/// OAuth 2.0 client credentials for a machine-to-machine application.
///
/// The client exchanges these for a management token at
/// `{tenant}/oauth/token` and refreshes the token shortly before it
/// expires. The application must be authorized for the Management API with
/// the scopes the calls need (`read:hooks`, `update:guardian_factors`, ...).
///
/// ## Example
///
/// ```rust,ignore
/// use auth0_management::{Client, ClientCredentialsConfig};
///
/// let client = Client::builder()
///     .domain("example.eu.auth0.com")
///     .credentials(ClientCredentialsConfig::new("client_id", "client_secret"))
///     .build()
///     .await?;
/// ```
pub struct ClientCredentialsConfig {
    /// The application's client ID.
    pub client_id: String,

    /// The API audience. Defaults to `{tenant}/api/v2/`.
    pub audience: Option<String>,

    client_secret: Zeroizing<String>,
}

impl ClientCredentialsConfig {
    /// Creates a new client credentials configuration.
    ///
    /// ```rust
    /// use auth0_management::ClientCredentialsConfig;
    ///
    /// let config = ClientCredentialsConfig::new("abc", "s3cr3t");
    /// assert_eq!(config.client_id, "abc");
    /// assert!(config.audience.is_none());
    /// ```
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            audience: None,
            client_secret: Zeroizing::new(client_secret.into()),
        }
    }

    /// Overrides the API audience (for custom domains).
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for ClientCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("audience", &self.audience)
            .finish()
    }
}

/// A pre-issued management API token.
///
/// Tokens issued from the dashboard expire; the client cannot refresh them.
#[derive(Clone)]
pub struct BearerCredentialsConfig {
    token: Arc<str>,
}

impl BearerCredentialsConfig {
    /// Creates a new bearer credentials configuration.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }

    /// Returns the bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for BearerCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerCredentialsConfig")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl<S: Into<String>> From<S> for BearerCredentialsConfig {
    fn from(token: S) -> Self {
        Self::new(token)
    }
}

/// How the client authenticates against the Management API.
pub enum Credentials {
    /// Client credentials grant, exchanged and refreshed automatically.
    ClientCredentials(Box<ClientCredentialsConfig>),

    /// A static token.
    Bearer(BearerCredentialsConfig),

    /// A custom token source.
    Provider(Arc<dyn CredentialsProvider>),
}

impl Credentials {
    /// Wraps a custom provider.
    pub fn provider(provider: impl CredentialsProvider + 'static) -> Self {
        Credentials::Provider(Arc::new(provider))
    }

    /// Returns `true` if this is client credentials authentication.
    pub fn is_client_credentials(&self) -> bool {
        matches!(self, Credentials::ClientCredentials(_))
    }

    /// Returns `true` if this is bearer token authentication.
    pub fn is_bearer(&self) -> bool {
        matches!(self, Credentials::Bearer(_))
    }

    /// Returns the client credentials config if applicable.
    pub fn as_client_credentials(&self) -> Option<&ClientCredentialsConfig> {
        match self {
            Credentials::ClientCredentials(config) => Some(config),
            _ => None,
        }
    }

    /// Returns the bearer config if applicable.
    pub fn as_bearer(&self) -> Option<&BearerCredentialsConfig> {
        match self {
            Credentials::Bearer(config) => Some(config),
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ClientCredentials(config) => {
                f.debug_tuple("ClientCredentials").field(config).finish()
            }
            Credentials::Bearer(config) => f.debug_tuple("Bearer").field(config).finish(),
            Credentials::Provider(_) => f.debug_tuple("Provider").finish_non_exhaustive(),
        }
    }
}

impl From<ClientCredentialsConfig> for Credentials {
    fn from(config: ClientCredentialsConfig) -> Self {
        Credentials::ClientCredentials(Box::new(config))
    }
}

impl From<BearerCredentialsConfig> for Credentials {
    fn from(config: BearerCredentialsConfig) -> Self {
        Credentials::Bearer(config)
    }
}

impl From<Arc<dyn CredentialsProvider>> for Credentials {
    fn from(provider: Arc<dyn CredentialsProvider>) -> Self {
        Credentials::Provider(provider)
    }
}
