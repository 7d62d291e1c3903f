//! TLS configuration for connections to the tenant.

use std::path::PathBuf;

/// TLS settings for the HTTP client.
///
/// By default the client trusts the platform roots and verifies the
/// tenant's certificate. A custom CA is only needed behind an intercepting
/// proxy.
///
/// ## Example
///
/// ```rust
/// use auth0_management::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .ca_cert_file("/etc/ssl/corp-proxy.crt")
///     .build();
/// assert!(config.has_custom_ca());
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// Additional CA certificate, as a PEM file path.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// Additional CA certificate, as PEM data.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Skip certificate verification and allow plain HTTP.
    ///
    /// **WARNING**: only for local mock servers.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Creates a config that skips verification.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if a custom CA is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }

    /// Loads the configured CA certificates as PEM bytes.
    pub(crate) fn ca_certificates(&self) -> Result<Vec<Vec<u8>>, crate::Error> {
        let mut certs = Vec::new();
        if let Some(ref path) = self.ca_cert_file {
            let pem = std::fs::read(path).map_err(|e| {
                crate::Error::configuration(format!(
                    "failed to read CA certificate {}: {}",
                    path.display(),
                    e
                ))
                .with_source(e)
            })?;
            certs.push(pem);
        }
        if let Some(ref pem) = self.ca_cert_pem {
            certs.push(pem.as_bytes().to_vec());
        }
        Ok(certs)
    }
}
