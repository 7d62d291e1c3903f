//! Guardian integration tests.
//!
//! Guardian settings are tenant-wide; each test restores what it changes.

use auth0_management::guardian::{
    CreateEnrollmentTicket, MultiFactorSmsTemplate, MultiFactorWebAuthnSettings, PhoneMessageType,
    PhoneMessageTypes,
};

use crate::common::{client, test_user_id};

#[tokio::test]
async fn test_list_factors() {
    let client = client().await.expect("Failed to create client");

    let factors = client.guardian().multi_factor().list().await.expect("Failed to list factors");

    assert!(!factors.is_empty());
    assert!(factors.iter().any(|f| f.name.as_deref() == Some("otp")));
}

#[tokio::test]
async fn test_policy_round_trip() {
    let client = client().await.expect("Failed to create client");
    let mfa = client.guardian().multi_factor();

    let original = mfa.policy().await.expect("Failed to read policy");
    let updated = mfa.update_policy(original.clone()).await.expect("Failed to update policy");

    assert_eq!(updated, original);
}

#[tokio::test]
async fn test_toggle_otp() {
    let client = client().await.expect("Failed to create client");
    let mfa = client.guardian().multi_factor();

    let was_enabled = mfa
        .list()
        .await
        .expect("Failed to list factors")
        .into_iter()
        .find(|f| f.name.as_deref() == Some("otp"))
        .and_then(|f| f.enabled)
        .unwrap_or(false);

    let toggled = mfa.otp().enable(!was_enabled).await.expect("Failed to toggle OTP");
    assert_eq!(toggled.enabled, Some(!was_enabled));

    mfa.otp().enable(was_enabled).await.expect("Failed to restore OTP");
}

#[tokio::test]
async fn test_sms_template() {
    let client = client().await.expect("Failed to create client");
    let sms = client.guardian().multi_factor().sms();

    let original = sms.template().await.expect("Failed to read template");
    let template = MultiFactorSmsTemplate::new()
        .with_enrollment_message("Test {{code}} for {{tenant.friendly_name}}")
        .with_verification_message("Test {{code}}");

    let updated = sms.update_template(template.clone()).await.expect("Failed to update template");
    assert_eq!(updated.enrollment_message, template.enrollment_message);

    sms.update_template(original).await.expect("Failed to restore template");
}

#[tokio::test]
async fn test_phone_message_types() {
    let client = client().await.expect("Failed to create client");
    let phone = client.guardian().multi_factor().phone();

    let original = phone.message_types().await.expect("Failed to read message types");
    let updated = phone
        .update_message_types(PhoneMessageTypes::new([PhoneMessageType::Sms]))
        .await
        .expect("Failed to update message types");
    assert_eq!(updated.message_types, Some(vec![PhoneMessageType::Sms]));

    phone.update_message_types(original).await.expect("Failed to restore message types");
}

#[tokio::test]
async fn test_webauthn_roaming_settings() {
    let client = client().await.expect("Failed to create client");
    let roaming = client.guardian().multi_factor().webauthn_roaming();

    let original = roaming.settings().await.expect("Failed to read settings");
    let updated = roaming
        .update_settings(MultiFactorWebAuthnSettings {
            override_relying_party: Some(false),
            ..original.clone()
        })
        .await
        .expect("Failed to update settings");
    assert_eq!(updated.override_relying_party, Some(false));

    roaming.update_settings(original).await.expect("Failed to restore settings");
}

#[tokio::test]
async fn test_enrollment_ticket() {
    let Some(user_id) = test_user_id() else {
        println!("AUTH0_TEST_USER_ID not set, skipping");
        return;
    };
    let client = client().await.expect("Failed to create client");

    let ticket = client
        .guardian()
        .enrollments()
        .create_ticket(CreateEnrollmentTicket::new(user_id))
        .await
        .expect("Failed to create ticket");

    assert!(!ticket.ticket_id.is_empty());
    assert!(ticket.ticket_url.starts_with("https://"));
}
