//! Duo Security factor.

use serde::{Deserialize, Serialize};

use super::{MultiFactor, enable_factor};
use crate::Error;
use crate::client::Client;

/// Client for the Duo Security factor.
///
/// Access via `client.guardian().multi_factor().duo()`.
#[derive(Clone)]
pub struct DuoClient {
    client: Client,
}

impl DuoClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Enables or disables Duo.
    pub async fn enable(&self, enabled: bool) -> Result<MultiFactor, Error> {
        enable_factor(&self.client, "duo", enabled).await
    }

    /// Retrieves the Duo settings.
    pub async fn settings(&self) -> Result<MultiFactorDuoSettings, Error> {
        self.client
            .inner()
            .get(&["guardian", "factors", "duo", "settings"])
            .await
    }

    /// Updates the Duo settings.
    pub async fn update_settings(
        &self,
        settings: MultiFactorDuoSettings,
    ) -> Result<MultiFactorDuoSettings, Error> {
        self.client
            .inner()
            .put(&["guardian", "factors", "duo", "settings"], &settings)
            .await
    }
}

impl std::fmt::Debug for DuoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuoClient").finish_non_exhaustive()
    }
}

/// Duo Security integration settings.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFactorDuoSettings {
    /// Duo API hostname.
    #[serde(rename = "host", skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Integration key.
    #[serde(rename = "ikey", skip_serializing_if = "Option::is_none")]
    pub integration_key: Option<String>,
    /// Secret key.
    #[serde(rename = "skey", skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

impl MultiFactorDuoSettings {
    /// Creates a complete settings value.
    pub fn new(
        hostname: impl Into<String>,
        integration_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            hostname: Some(hostname.into()),
            integration_key: Some(integration_key.into()),
            secret_key: Some(secret_key.into()),
        }
    }
}

impl std::fmt::Debug for MultiFactorDuoSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiFactorDuoSettings")
            .field("hostname", &self.hostname)
            .field("integration_key", &self.integration_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
