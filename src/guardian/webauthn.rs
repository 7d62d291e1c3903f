//! WebAuthn factors: roaming (security keys) and platform (device biometrics).

use serde::{Deserialize, Serialize};

use super::{MultiFactor, enable_factor};
use crate::Error;
use crate::client::Client;

/// User verification requirement for WebAuthn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserVerification {
    /// Verification is not requested.
    Discouraged,
    /// Verification is requested if the authenticator supports it.
    Preferred,
    /// Verification is mandatory.
    Required,
    /// A requirement this client does not know, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// WebAuthn factor settings. Fields are camelCase on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiFactorWebAuthnSettings {
    /// Whether to use `relying_party_identifier` instead of the tenant domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_relying_party: Option<bool>,
    /// The relying party identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relying_party_identifier: Option<String>,
    /// User verification requirement (roaming only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_verification: Option<UserVerification>,
}

impl MultiFactorWebAuthnSettings {
    /// Creates an empty settings update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the relying party with the given identifier.
    #[must_use]
    pub fn with_relying_party(mut self, identifier: impl Into<String>) -> Self {
        self.override_relying_party = Some(true);
        self.relying_party_identifier = Some(identifier.into());
        self
    }

    /// Sets the user verification requirement.
    #[must_use]
    pub fn with_user_verification(mut self, verification: UserVerification) -> Self {
        self.user_verification = Some(verification);
        self
    }
}

async fn get_settings(client: &Client, factor: &str) -> Result<MultiFactorWebAuthnSettings, Error> {
    client
        .inner()
        .get(&["guardian", "factors", factor, "settings"])
        .await
}

async fn put_settings(
    client: &Client,
    factor: &str,
    settings: &MultiFactorWebAuthnSettings,
) -> Result<MultiFactorWebAuthnSettings, Error> {
    client
        .inner()
        .put(&["guardian", "factors", factor, "settings"], settings)
        .await
}

/// Client for WebAuthn with security keys.
///
/// Access via `client.guardian().multi_factor().webauthn_roaming()`.
#[derive(Clone)]
pub struct WebAuthnRoamingClient {
    client: Client,
}

impl WebAuthnRoamingClient {
    const FACTOR: &'static str = "webauthn-roaming";

    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Enables or disables the factor.
    pub async fn enable(&self, enabled: bool) -> Result<MultiFactor, Error> {
        enable_factor(&self.client, Self::FACTOR, enabled).await
    }

    /// Retrieves the factor settings.
    pub async fn settings(&self) -> Result<MultiFactorWebAuthnSettings, Error> {
        get_settings(&self.client, Self::FACTOR).await
    }

    /// Updates the factor settings.
    pub async fn update_settings(
        &self,
        settings: MultiFactorWebAuthnSettings,
    ) -> Result<MultiFactorWebAuthnSettings, Error> {
        put_settings(&self.client, Self::FACTOR, &settings).await
    }
}

impl std::fmt::Debug for WebAuthnRoamingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebAuthnRoamingClient").finish_non_exhaustive()
    }
}

/// Client for WebAuthn with device biometrics.
///
/// Access via `client.guardian().multi_factor().webauthn_platform()`.
#[derive(Clone)]
pub struct WebAuthnPlatformClient {
    client: Client,
}

impl WebAuthnPlatformClient {
    const FACTOR: &'static str = "webauthn-platform";

    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Enables or disables the factor.
    pub async fn enable(&self, enabled: bool) -> Result<MultiFactor, Error> {
        enable_factor(&self.client, Self::FACTOR, enabled).await
    }

    /// Retrieves the factor settings.
    pub async fn settings(&self) -> Result<MultiFactorWebAuthnSettings, Error> {
        get_settings(&self.client, Self::FACTOR).await
    }

    /// Updates the factor settings.
    pub async fn update_settings(
        &self,
        settings: MultiFactorWebAuthnSettings,
    ) -> Result<MultiFactorWebAuthnSettings, Error> {
        put_settings(&self.client, Self::FACTOR, &settings).await
    }
}

impl std::fmt::Debug for WebAuthnPlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebAuthnPlatformClient").finish_non_exhaustive()
    }
}
