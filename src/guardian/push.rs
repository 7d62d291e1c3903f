//! Push notification factor.

use serde::{Deserialize, Serialize};

use super::{MultiFactor, enable_factor};
use crate::Error;
use crate::client::Client;

/// Client for the push notification factor.
///
/// Access via `client.guardian().multi_factor().push()`.
#[derive(Clone)]
pub struct PushClient {
    client: Client,
}

impl PushClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Enables or disables push notifications.
    pub async fn enable(&self, enabled: bool) -> Result<MultiFactor, Error> {
        enable_factor(&self.client, "push-notification", enabled).await
    }

    /// Retrieves the Amazon SNS configuration.
    pub async fn amazon_sns(&self) -> Result<MultiFactorProviderAmazonSns, Error> {
        self.client
            .inner()
            .get(&["guardian", "factors", "push-notification", "providers", "sns"])
            .await
    }

    /// Updates the Amazon SNS configuration.
    pub async fn update_amazon_sns(
        &self,
        sns: MultiFactorProviderAmazonSns,
    ) -> Result<MultiFactorProviderAmazonSns, Error> {
        self.client
            .inner()
            .put(
                &["guardian", "factors", "push-notification", "providers", "sns"],
                &sns,
            )
            .await
    }
}

impl std::fmt::Debug for PushClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushClient").finish_non_exhaustive()
    }
}

/// Amazon SNS configuration for push notifications.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFactorProviderAmazonSns {
    /// AWS access key ID.
    #[serde(rename = "aws_access_key_id", skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    /// AWS secret access key.
    #[serde(rename = "aws_secret_access_key", skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    /// AWS region.
    #[serde(rename = "aws_region", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// SNS APNS platform application ARN.
    #[serde(
        rename = "sns_apns_platform_application_arn",
        skip_serializing_if = "Option::is_none"
    )]
    pub apns_platform_application_arn: Option<String>,
    /// SNS GCM platform application ARN.
    #[serde(
        rename = "sns_gcm_platform_application_arn",
        skip_serializing_if = "Option::is_none"
    )]
    pub gcm_platform_application_arn: Option<String>,
}

impl MultiFactorProviderAmazonSns {
    /// Creates an empty configuration update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AWS credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Sets the AWS region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the APNS platform application ARN.
    #[must_use]
    pub fn with_apns_platform_application_arn(mut self, arn: impl Into<String>) -> Self {
        self.apns_platform_application_arn = Some(arn.into());
        self
    }

    /// Sets the GCM platform application ARN.
    #[must_use]
    pub fn with_gcm_platform_application_arn(mut self, arn: impl Into<String>) -> Self {
        self.gcm_platform_application_arn = Some(arn.into());
        self
    }
}

impl std::fmt::Debug for MultiFactorProviderAmazonSns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiFactorProviderAmazonSns")
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("region", &self.region)
            .field(
                "apns_platform_application_arn",
                &self.apns_platform_application_arn,
            )
            .field(
                "gcm_platform_application_arn",
                &self.gcm_platform_application_arn,
            )
            .finish()
    }
}
