//! Client builder with typestate pattern.

use std::{marker::PhantomData, time::Duration};

use url::Url;

use super::inner::ClientInner;
use crate::{
    Client, Error,
    auth::{Credentials, TokenManager},
    config::{RetryConfig, TlsConfig},
    user_agent,
};

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker type: URL not yet provided.
pub struct NoUrl;

/// Marker type: URL has been provided.
pub struct HasUrl;

/// Marker type: Credentials not yet provided.
pub struct NoCredentials;

/// Marker type: Credentials have been provided.
pub struct HasCredentials;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern so that `build()` only exists once both the
/// tenant and the credentials are known.
///
/// ## Required Configuration
///
/// - `url()` or `domain()`: the tenant
/// - `credentials()`: how to obtain a management token
///
/// ## Optional Configuration
///
/// - `retry_config()`: retries for rate limits and transient failures
/// - `tls_config()`: custom CA certificates
/// - `timeout()`: per-request timeout (default 30s)
///
/// ## Example
///
/// ```rust,ignore
/// use auth0_management::{Client, ClientCredentialsConfig, RetryConfig};
///
/// let client = Client::builder()
///     .domain("example.eu.auth0.com")
///     .credentials(ClientCredentialsConfig::new(client_id, client_secret))
///     .retry_config(RetryConfig::new().with_max_retries(5))
///     .build()
///     .await?;
/// ```
pub struct ClientBuilder<UrlState, CredentialsState> {
    url: Option<String>,
    credentials: Option<Credentials>,
    retry_config: RetryConfig,
    tls_config: TlsConfig,
    timeout: Option<Duration>,
    _url_state: PhantomData<UrlState>,
    _credentials_state: PhantomData<CredentialsState>,
}

impl ClientBuilder<NoUrl, NoCredentials> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            url: None,
            credentials: None,
            retry_config: RetryConfig::default(),
            tls_config: TlsConfig::default(),
            timeout: None,
            _url_state: PhantomData,
            _credentials_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoUrl, NoCredentials> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U, C> ClientBuilder<U, C> {
    fn transition<U2, C2>(self) -> ClientBuilder<U2, C2> {
        ClientBuilder {
            url: self.url,
            credentials: self.credentials,
            retry_config: self.retry_config,
            tls_config: self.tls_config,
            timeout: self.timeout,
            _url_state: PhantomData,
            _credentials_state: PhantomData,
        }
    }
}

impl<C> ClientBuilder<NoUrl, C> {
    /// Sets the tenant URL, e.g. `https://example.eu.auth0.com`.
    ///
    /// Management endpoints are resolved under `{url}/api/v2/`.
    pub fn url(mut self, url: impl Into<String>) -> ClientBuilder<HasUrl, C> {
        self.url = Some(url.into());
        self.transition()
    }

    /// Sets the tenant by domain; shorthand for `url("https://{domain}")`.
    pub fn domain(self, domain: impl AsRef<str>) -> ClientBuilder<HasUrl, C> {
        let url = format!("https://{}", domain.as_ref().trim_end_matches('/'));
        self.url(url)
    }
}

impl<U> ClientBuilder<U, NoCredentials> {
    /// Sets the authentication credentials.
    ///
    /// Accepts anything convertible into [`Credentials`]:
    /// - [`ClientCredentialsConfig`](crate::ClientCredentialsConfig)
    /// - [`BearerCredentialsConfig`](crate::BearerCredentialsConfig)
    /// - `Arc<dyn CredentialsProvider>`
    pub fn credentials(
        mut self,
        credentials: impl Into<Credentials>,
    ) -> ClientBuilder<U, HasCredentials> {
        self.credentials = Some(credentials.into());
        self.transition()
    }
}

impl<U, C> ClientBuilder<U, C> {
    /// Sets the retry configuration.
    #[must_use]
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets the TLS configuration.
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Disables TLS certificate verification and allows HTTP connections.
    ///
    /// **WARNING**: only for local mock servers. Never use this against a
    /// real tenant.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.tls_config.skip_verification = true;
        self
    }

    /// Sets the per-request timeout. Retries each get a fresh timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl ClientBuilder<HasUrl, HasCredentials> {
    /// Builds the client.
    ///
    /// No request is sent; client credentials are exchanged lazily on the
    /// first call.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if:
    /// - The URL is invalid or has no host
    /// - The URL is not HTTPS and `insecure()` was not set
    /// - A configured CA certificate cannot be loaded
    pub async fn build(self) -> Result<Client, Error> {
        let raw_url = self.url.ok_or_else(|| Error::configuration("URL is required"))?;
        let credentials =
            self.credentials.ok_or_else(|| Error::configuration("credentials are required"))?;

        let url = normalize_tenant_url(&raw_url)?;
        if url.scheme() != "https" && !self.tls_config.skip_verification {
            return Err(Error::configuration(
                "HTTPS is required. Use .insecure() for development with HTTP.",
            ));
        }
        let api_url = url.join("api/v2/")?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let http_client = build_http_client(&self.tls_config, timeout)?;
        let tokens = TokenManager::new(credentials, &url)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(tenant = %url, "management client configured");

        Ok(Client::from_inner(ClientInner {
            url,
            api_url,
            retry_config: self.retry_config,
            timeout,
            http_client,
            tokens,
        }))
    }
}

/// Parses the tenant URL and strips any path, query or fragment.
fn normalize_tenant_url(raw: &str) -> Result<Url, Error> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| Error::configuration(format!("invalid URL: {}", e)))?;

    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::configuration(format!("URL has no host: {}", raw)));
    }

    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[allow(unused_mut)]
fn build_http_client(tls: &TlsConfig, timeout: Duration) -> Result<reqwest::Client, Error> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::HeaderName::from_static(user_agent::AUTH0_CLIENT),
        user_agent::auth0_client(),
    );

    let mut builder = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .user_agent(user_agent::user_agent())
        .default_headers(headers);

    #[cfg(any(feature = "rustls", feature = "native-tls"))]
    {
        if tls.skip_verification {
            builder = builder.danger_accept_invalid_certs(true);
        }
        for pem in tls.ca_certificates()? {
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                Error::configuration(format!("invalid CA certificate: {}", e)).with_source(e)
            })?;
            builder = builder.add_root_certificate(cert);
        }
    }

    #[cfg(not(any(feature = "rustls", feature = "native-tls")))]
    if tls.has_custom_ca() {
        return Err(Error::configuration(
            "custom CA certificates require the 'rustls' or 'native-tls' feature",
        ));
    }

    builder
        .build()
        .map_err(|e| Error::configuration(format!("failed to create HTTP client: {}", e)))
}
