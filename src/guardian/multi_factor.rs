//! Factors and MFA policies.

use serde::{Deserialize, Serialize};

use super::{
    DuoClient, PhoneClient, PushClient, SmsClient, WebAuthnPlatformClient, WebAuthnRoamingClient,
    enable_factor,
};
use crate::Error;
use crate::client::Client;

/// Client for multi-factor authentication factors and policies.
///
/// Access via `client.guardian().multi_factor()`.
///
/// ## Example
///
/// ```rust,ignore
/// let mfa = client.guardian().multi_factor();
///
/// for factor in mfa.list().await? {
///     println!("{:?}: {:?}", factor.name, factor.enabled);
/// }
///
/// mfa.otp().enable(true).await?;
/// ```
#[derive(Clone)]
pub struct MultiFactorClient {
    client: Client,
}

impl MultiFactorClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists all factors and whether they are enabled.
    pub async fn list(&self) -> Result<Vec<MultiFactor>, Error> {
        self.client.inner().get(&["guardian", "factors"]).await
    }

    /// Retrieves the MFA policies.
    pub async fn policy(&self) -> Result<MultiFactorPolicies, Error> {
        self.client.inner().get(&["guardian", "policies"]).await
    }

    /// Replaces the MFA policies.
    ///
    /// An empty policy list means MFA is only enforced by rules and actions.
    pub async fn update_policy(
        &self,
        policies: MultiFactorPolicies,
    ) -> Result<MultiFactorPolicies, Error> {
        self.client
            .inner()
            .put(&["guardian", "policies"], &policies)
            .await
    }

    /// Phone (SMS or voice) factor.
    pub fn phone(&self) -> PhoneClient {
        PhoneClient::new(self.client.clone())
    }

    /// SMS factor.
    pub fn sms(&self) -> SmsClient {
        SmsClient::new(self.client.clone())
    }

    /// Push notification factor (Guardian app).
    pub fn push(&self) -> PushClient {
        PushClient::new(self.client.clone())
    }

    /// Email factor.
    pub fn email(&self) -> EmailClient {
        EmailClient::new(self.client.clone())
    }

    /// Duo Security factor.
    pub fn duo(&self) -> DuoClient {
        DuoClient::new(self.client.clone())
    }

    /// One-time password factor.
    pub fn otp(&self) -> OtpClient {
        OtpClient::new(self.client.clone())
    }

    /// WebAuthn with security keys.
    pub fn webauthn_roaming(&self) -> WebAuthnRoamingClient {
        WebAuthnRoamingClient::new(self.client.clone())
    }

    /// WebAuthn with device biometrics.
    pub fn webauthn_platform(&self) -> WebAuthnPlatformClient {
        WebAuthnPlatformClient::new(self.client.clone())
    }
}

impl std::fmt::Debug for MultiFactorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiFactorClient").finish_non_exhaustive()
    }
}

/// Client for the email factor.
#[derive(Clone)]
pub struct EmailClient {
    client: Client,
}

impl EmailClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Enables or disables the email factor.
    pub async fn enable(&self, enabled: bool) -> Result<MultiFactor, Error> {
        enable_factor(&self.client, "email", enabled).await
    }
}

impl std::fmt::Debug for EmailClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailClient").finish_non_exhaustive()
    }
}

/// Client for the one-time password factor.
#[derive(Clone)]
pub struct OtpClient {
    client: Client,
}

impl OtpClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Enables or disables the OTP factor.
    pub async fn enable(&self, enabled: bool) -> Result<MultiFactor, Error> {
        enable_factor(&self.client, "otp", enabled).await
    }
}

impl std::fmt::Debug for OtpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpClient").finish_non_exhaustive()
    }
}

/// A multi-factor authentication factor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFactor {
    /// Whether the factor is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Factor name, e.g. `sms` or `push-notification`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the trial of this factor has expired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_expired: Option<bool>,
}

/// When MFA is required.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultiFactorPolicy {
    /// Always require MFA.
    AllApplications,
    /// Require MFA based on the login's risk assessment.
    ConfidenceScore,
    /// A policy this client does not know, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for MultiFactorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultiFactorPolicy::AllApplications => write!(f, "all-applications"),
            MultiFactorPolicy::ConfidenceScore => write!(f, "confidence-score"),
            MultiFactorPolicy::Other(policy) => f.write_str(policy),
        }
    }
}

/// The tenant's MFA policies. Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiFactorPolicies(pub Vec<MultiFactorPolicy>);

impl MultiFactorPolicies {
    /// Creates an empty policy list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the policy is set.
    pub fn contains(&self, policy: &MultiFactorPolicy) -> bool {
        self.0.contains(policy)
    }

    /// Returns whether no policy is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the policies.
    pub fn iter(&self) -> std::slice::Iter<'_, MultiFactorPolicy> {
        self.0.iter()
    }
}

impl<const N: usize> From<[MultiFactorPolicy; N]> for MultiFactorPolicies {
    fn from(policies: [MultiFactorPolicy; N]) -> Self {
        Self(policies.to_vec())
    }
}

impl From<Vec<MultiFactorPolicy>> for MultiFactorPolicies {
    fn from(policies: Vec<MultiFactorPolicy>) -> Self {
        Self(policies)
    }
}

impl FromIterator<MultiFactorPolicy> for MultiFactorPolicies {
    fn from_iter<I: IntoIterator<Item = MultiFactorPolicy>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(MultiFactorPolicy::AllApplications, "all-applications")]
    #[test_case(MultiFactorPolicy::ConfidenceScore, "confidence-score")]
    fn test_policy_wire_name(policy: MultiFactorPolicy, wire: &str) {
        assert_eq!(serde_json::to_value(&policy).unwrap(), serde_json::json!(wire));
        assert_eq!(policy.to_string(), wire);
    }

    #[test]
    fn test_policies_are_a_bare_array() {
        let policies = MultiFactorPolicies::from([MultiFactorPolicy::AllApplications]);
        assert_eq!(
            serde_json::to_value(&policies).unwrap(),
            serde_json::json!(["all-applications"])
        );

        let empty: MultiFactorPolicies = serde_json::from_str("[]").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_policies_contains() {
        let policies: MultiFactorPolicies =
            [MultiFactorPolicy::ConfidenceScore].into_iter().collect();
        assert!(policies.contains(&MultiFactorPolicy::ConfidenceScore));
        assert!(!policies.contains(&MultiFactorPolicy::AllApplications));
        assert_eq!(policies.iter().count(), 1);
    }

    #[test]
    fn test_unknown_policy_survives_round_trip() {
        let policies: MultiFactorPolicies =
            serde_json::from_value(serde_json::json!(["all-applications", "never"])).unwrap();

        assert!(policies.contains(&MultiFactorPolicy::AllApplications));
        assert!(policies.contains(&MultiFactorPolicy::Other("never".into())));
        assert_eq!(
            serde_json::to_value(&policies).unwrap(),
            serde_json::json!(["all-applications", "never"])
        );
    }

    #[test]
    fn test_multi_factor_deserialize() {
        let factor: MultiFactor = serde_json::from_value(serde_json::json!({
            "name": "sms",
            "enabled": true,
            "trial_expired": false
        }))
        .unwrap();
        assert_eq!(factor.name.as_deref(), Some("sms"));
        assert_eq!(factor.enabled, Some(true));
        assert_eq!(factor.trial_expired, Some(false));
    }
}
