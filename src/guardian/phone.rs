//! Phone and SMS factors.

use serde::{Deserialize, Serialize};

use super::{MultiFactor, enable_factor};
use crate::Error;
use crate::client::Client;

/// Client for the phone factor (SMS or voice).
///
/// Access via `client.guardian().multi_factor().phone()`.
///
/// ## Example
///
/// ```rust,ignore
/// let phone = client.guardian().multi_factor().phone();
///
/// phone.update_provider(MultiFactorProvider::new(PhoneProvider::Twilio)).await?;
/// phone.update_message_types(PhoneMessageTypes::new([
///     PhoneMessageType::Sms,
///     PhoneMessageType::Voice,
/// ])).await?;
/// ```
#[derive(Clone)]
pub struct PhoneClient {
    client: Client,
}

impl PhoneClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Enables or disables the phone factor.
    ///
    /// There is no dedicated phone toggle, so this switches the `sms` factor.
    pub async fn enable(&self, enabled: bool) -> Result<MultiFactor, Error> {
        enable_factor(&self.client, "sms", enabled).await
    }

    /// Retrieves the selected phone provider.
    pub async fn provider(&self) -> Result<MultiFactorProvider, Error> {
        self.client
            .inner()
            .get(&["guardian", "factors", "phone", "selected-provider"])
            .await
    }

    /// Selects the phone provider.
    pub async fn update_provider(
        &self,
        provider: MultiFactorProvider,
    ) -> Result<MultiFactorProvider, Error> {
        self.client
            .inner()
            .put(&["guardian", "factors", "phone", "selected-provider"], &provider)
            .await
    }

    /// Retrieves the enabled delivery methods.
    pub async fn message_types(&self) -> Result<PhoneMessageTypes, Error> {
        self.client
            .inner()
            .get(&["guardian", "factors", "phone", "message-types"])
            .await
    }

    /// Replaces the enabled delivery methods.
    pub async fn update_message_types(
        &self,
        message_types: PhoneMessageTypes,
    ) -> Result<PhoneMessageTypes, Error> {
        self.client
            .inner()
            .put(&["guardian", "factors", "phone", "message-types"], &message_types)
            .await
    }
}

impl std::fmt::Debug for PhoneClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhoneClient").finish_non_exhaustive()
    }
}

/// Client for the SMS factor.
///
/// Access via `client.guardian().multi_factor().sms()`.
#[derive(Clone)]
pub struct SmsClient {
    client: Client,
}

impl SmsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Enables or disables the SMS factor.
    pub async fn enable(&self, enabled: bool) -> Result<MultiFactor, Error> {
        enable_factor(&self.client, "sms", enabled).await
    }

    /// Retrieves the enrollment and verification templates.
    pub async fn template(&self) -> Result<MultiFactorSmsTemplate, Error> {
        self.client
            .inner()
            .get(&["guardian", "factors", "sms", "templates"])
            .await
    }

    /// Updates the enrollment and verification templates.
    pub async fn update_template(
        &self,
        template: MultiFactorSmsTemplate,
    ) -> Result<MultiFactorSmsTemplate, Error> {
        self.client
            .inner()
            .put(&["guardian", "factors", "sms", "templates"], &template)
            .await
    }

    /// Retrieves the Twilio configuration.
    pub async fn twilio(&self) -> Result<MultiFactorProviderTwilio, Error> {
        self.client
            .inner()
            .get(&["guardian", "factors", "sms", "providers", "twilio"])
            .await
    }

    /// Updates the Twilio configuration.
    pub async fn update_twilio(
        &self,
        twilio: MultiFactorProviderTwilio,
    ) -> Result<MultiFactorProviderTwilio, Error> {
        self.client
            .inner()
            .put(&["guardian", "factors", "sms", "providers", "twilio"], &twilio)
            .await
    }
}

impl std::fmt::Debug for SmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsClient").finish_non_exhaustive()
    }
}

/// Phone message delivery provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhoneProvider {
    /// The platform's built-in provider.
    Auth0,
    /// Twilio.
    Twilio,
    /// A custom phone message hook.
    PhoneMessageHook,
    /// A provider this client does not know, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for PhoneProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhoneProvider::Auth0 => write!(f, "auth0"),
            PhoneProvider::Twilio => write!(f, "twilio"),
            PhoneProvider::PhoneMessageHook => write!(f, "phone-message-hook"),
            PhoneProvider::Other(provider) => f.write_str(provider),
        }
    }
}

/// The selected phone provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFactorProvider {
    /// The provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<PhoneProvider>,
}

impl MultiFactorProvider {
    /// Creates a provider selection.
    pub fn new(provider: PhoneProvider) -> Self {
        Self {
            provider: Some(provider),
        }
    }
}

/// A phone delivery method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneMessageType {
    /// Text message.
    Sms,
    /// Voice call.
    Voice,
    /// A delivery method this client does not know, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Enabled phone delivery methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneMessageTypes {
    /// The methods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_types: Option<Vec<PhoneMessageType>>,
}

impl PhoneMessageTypes {
    /// Creates a set of delivery methods.
    pub fn new(message_types: impl IntoIterator<Item = PhoneMessageType>) -> Self {
        Self {
            message_types: Some(message_types.into_iter().collect()),
        }
    }
}

/// SMS templates. Both support the `{{code}}` placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFactorSmsTemplate {
    /// Message sent on enrollment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_message: Option<String>,
    /// Message sent on verification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_message: Option<String>,
}

impl MultiFactorSmsTemplate {
    /// Creates an empty template update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enrollment message.
    #[must_use]
    pub fn with_enrollment_message(mut self, message: impl Into<String>) -> Self {
        self.enrollment_message = Some(message.into());
        self
    }

    /// Sets the verification message.
    #[must_use]
    pub fn with_verification_message(mut self, message: impl Into<String>) -> Self {
        self.verification_message = Some(message.into());
        self
    }
}

/// Twilio configuration for SMS delivery.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFactorProviderTwilio {
    /// Sender phone number. Either this or `messaging_service_sid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Messaging service SID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_service_sid: Option<String>,
    /// Twilio auth token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Twilio account SID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

impl MultiFactorProviderTwilio {
    /// Creates an empty configuration update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender number.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Sets the messaging service SID.
    #[must_use]
    pub fn with_messaging_service_sid(mut self, sid: impl Into<String>) -> Self {
        self.messaging_service_sid = Some(sid.into());
        self
    }

    /// Sets the account SID and auth token.
    #[must_use]
    pub fn with_account(mut self, sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self.auth_token = Some(auth_token.into());
        self
    }
}

impl std::fmt::Debug for MultiFactorProviderTwilio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiFactorProviderTwilio")
            .field("from", &self.from)
            .field("messaging_service_sid", &self.messaging_service_sid)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("sid", &self.sid)
            .finish()
    }
}
