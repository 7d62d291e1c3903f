//! Guardian enrollments and enrollment tickets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::client::Client;

/// Client for a user's MFA enrollments.
///
/// Access via `client.guardian().enrollments()`.
///
/// ## Example
///
/// ```rust,ignore
/// let enrollments = client.guardian().enrollments();
///
/// // Send the user an enrollment invitation
/// let ticket = enrollments
///     .create_ticket(CreateEnrollmentTicket::new("auth0|123").with_send_mail(true))
///     .await?;
///
/// // Force a re-enrollment
/// enrollments.delete("dev_0000000000000001").await?;
/// ```
#[derive(Clone)]
pub struct EnrollmentsClient {
    client: Client,
}

impl EnrollmentsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates an enrollment ticket for a user.
    ///
    /// The ticket URL can be handed to the user, or emailed by the service
    /// when `send_mail` is set.
    pub async fn create_ticket(
        &self,
        ticket: CreateEnrollmentTicket,
    ) -> Result<EnrollmentTicket, Error> {
        self.client
            .inner()
            .post(&["guardian", "enrollments", "ticket"], &ticket)
            .await
    }

    /// Retrieves an enrollment, including its status and type.
    pub async fn get(&self, id: impl AsRef<str>) -> Result<Enrollment, Error> {
        self.client
            .inner()
            .get(&["guardian", "enrollments", id.as_ref()])
            .await
    }

    /// Deletes an enrollment so the user can enroll again.
    pub async fn delete(&self, id: impl AsRef<str>) -> Result<(), Error> {
        self.client
            .inner()
            .delete(&["guardian", "enrollments", id.as_ref()])
            .await
    }
}

impl std::fmt::Debug for EnrollmentsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrollmentsClient").finish_non_exhaustive()
    }
}

/// Status of an enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// The user started but has not completed enrollment.
    Pending,
    /// The enrollment is active.
    Confirmed,
    /// A status this client does not know, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentStatus::Pending => write!(f, "pending"),
            EnrollmentStatus::Confirmed => write!(f, "confirmed"),
            EnrollmentStatus::Other(status) => f.write_str(status),
        }
    }
}

/// A user's enrollment in a multi-factor method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// The enrollment ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Enrollment status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EnrollmentStatus>,
    /// Device name (only for push notification).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Device identifier, usually the phone identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// When the enrollment was confirmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled_at: Option<DateTime<Utc>>,
    /// Last time the device was used to authenticate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_auth: Option<DateTime<Utc>>,
}

/// Request to create an enrollment ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEnrollmentTicket {
    /// The user the ticket is for.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    /// Alternate email address to send the ticket to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Whether the service should email the ticket.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub send_mail: bool,
}

impl CreateEnrollmentTicket {
    /// Creates a ticket request for the given user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Sends the ticket to this address instead of the user's own.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets whether the service emails the ticket.
    #[must_use]
    pub fn with_send_mail(mut self, send_mail: bool) -> Self {
        self.send_mail = send_mail;
        self
    }
}

/// An issued enrollment ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentTicket {
    /// The ticket ID.
    pub ticket_id: String,
    /// The URL the user visits to enroll.
    pub ticket_url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_omits_empty_fields() {
        let ticket = CreateEnrollmentTicket::new("auth0|123");
        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json, serde_json::json!({ "user_id": "auth0|123" }));

        let ticket = ticket.with_email("alt@example.com").with_send_mail(true);
        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_id": "auth0|123",
                "email": "alt@example.com",
                "send_mail": true
            })
        );
    }

    #[test]
    fn test_enrollment_deserialize() {
        let enrollment: Enrollment = serde_json::from_value(serde_json::json!({
            "id": "dev_1",
            "status": "confirmed",
            "phone_number": "+15555550123",
            "enrolled_at": "2021-04-20T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(enrollment.status, Some(EnrollmentStatus::Confirmed));
        assert_eq!(enrollment.phone_number.as_deref(), Some("+15555550123"));
        assert!(enrollment.enrolled_at.is_some());
        assert!(enrollment.last_auth.is_none());
    }

    #[test]
    fn test_enrollment_serialize_skips_absent() {
        let json = serde_json::to_value(Enrollment::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_enrollment_status_display() {
        assert_eq!(EnrollmentStatus::Pending.to_string(), "pending");
        assert_eq!(EnrollmentStatus::Confirmed.to_string(), "confirmed");
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let enrollment: Enrollment = serde_json::from_value(serde_json::json!({
            "id": "dev_1",
            "status": "expired"
        }))
        .unwrap();

        let status = enrollment.status.clone().unwrap();
        assert_eq!(status, EnrollmentStatus::Other("expired".into()));
        assert_eq!(status.to_string(), "expired");
        assert_eq!(
            serde_json::to_value(&enrollment).unwrap(),
            serde_json::json!({ "id": "dev_1", "status": "expired" })
        );
    }
}
