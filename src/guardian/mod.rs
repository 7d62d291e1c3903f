//! Guardian: multi-factor authentication configuration.
//!
//! ## API Hierarchy
//!
//! ```rust,ignore
//! let guardian = client.guardian();
//!
//! // Enrollments of individual users
//! let ticket = guardian
//!     .enrollments()
//!     .create_ticket(CreateEnrollmentTicket::new("auth0|123").with_send_mail(true))
//!     .await?;
//!
//! // Factors and policies
//! let mfa = guardian.multi_factor();
//! let factors = mfa.list().await?;
//! mfa.update_policy(MultiFactorPolicies::from([MultiFactorPolicy::AllApplications])).await?;
//!
//! // Per-factor settings
//! mfa.sms().update_template(MultiFactorSmsTemplate::new()
//!     .with_enrollment_message("{{code}} is your enrollment code")
//! ).await?;
//! mfa.duo().settings().await?;
//! ```

mod duo;
mod enrollments;
mod multi_factor;
mod phone;
mod push;
mod webauthn;

pub use duo::{DuoClient, MultiFactorDuoSettings};
pub use enrollments::{
    CreateEnrollmentTicket, Enrollment, EnrollmentStatus, EnrollmentTicket, EnrollmentsClient,
};
pub use multi_factor::{
    EmailClient, MultiFactor, MultiFactorClient, MultiFactorPolicies, MultiFactorPolicy, OtpClient,
};
pub use phone::{
    MultiFactorProvider, MultiFactorProviderTwilio, MultiFactorSmsTemplate, PhoneClient,
    PhoneMessageType, PhoneMessageTypes, PhoneProvider, SmsClient,
};
pub use push::{MultiFactorProviderAmazonSns, PushClient};
pub use webauthn::{
    MultiFactorWebAuthnSettings, UserVerification, WebAuthnPlatformClient, WebAuthnRoamingClient,
};

use serde::Serialize;

use crate::Error;
use crate::client::Client;

/// Client for Guardian (multi-factor authentication) operations.
///
/// Access via [`Client::guardian()`].
#[derive(Clone)]
pub struct GuardianClient {
    client: Client,
}

impl GuardianClient {
    /// Creates a new Guardian client.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a client for user enrollments.
    pub fn enrollments(&self) -> EnrollmentsClient {
        EnrollmentsClient::new(self.client.clone())
    }

    /// Returns a client for factors and MFA policies.
    pub fn multi_factor(&self) -> MultiFactorClient {
        MultiFactorClient::new(self.client.clone())
    }
}

impl std::fmt::Debug for GuardianClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardianClient").finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct EnableFactor {
    enabled: bool,
}

/// Toggles the named factor with `PUT guardian/factors/{factor}`.
async fn enable_factor(client: &Client, factor: &str, enabled: bool) -> Result<MultiFactor, Error> {
    #[cfg(feature = "tracing")]
    tracing::debug!(factor, enabled, "toggling guardian factor");

    client
        .inner()
        .put(&["guardian", "factors", factor], &EnableFactor { enabled })
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod wiremock_tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::test_support::create_mock_client;

    #[tokio::test]
    async fn test_enable_factor_sends_flag() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/v2/guardian/factors/otp"))
            .and(header("authorization", "Bearer test_token"))
            .and(body_json(serde_json::json!({ "enabled": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "enabled": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let factor = enable_factor(&client, "otp", false).await.unwrap();

        assert_eq!(factor.enabled, Some(false));
    }

    #[tokio::test]
    async fn test_enable_factor_maps_error() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/v2/guardian/factors/duo"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "statusCode": 403,
                "error": "Forbidden",
                "message": "Insufficient scope, expected any of: update:guardian_factors",
                "errorCode": "insufficient_scope"
            })))
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let err = client.guardian().multi_factor().duo().enable(true).await.unwrap_err();

        assert_eq!(err.kind(), crate::ErrorKind::Forbidden);
        assert_eq!(err.error_code(), Some("insufficient_scope"));
        assert!(err.message().contains("update:guardian_factors"));
    }
}
