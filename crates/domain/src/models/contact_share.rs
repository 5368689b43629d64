//! Contact share domain models.
//!
//! Matched attendees can each share their contact card once per match. The
//! share is one-directional; both sides sharing is two independent records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A contact card shared from one matched session to the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContactShare {
    pub id: Uuid,
    pub event_id: Uuid,
    pub match_id: String,
    pub sharer_session_id: String,
    pub recipient_session_id: String,
    pub full_name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Request to share contact details with a match.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ShareContactRequest {
    #[validate(length(min = 1, max = 64, message = "recipient_session_id is required"))]
    pub recipient_session_id: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "full_name must be between 1 and 100 characters"
    ))]
    pub full_name: String,

    #[validate(length(
        min = 5,
        max = 30,
        message = "phone_number must be between 5 and 30 characters"
    ))]
    pub phone_number: String,
}

/// Contact-share state of a conversation, from the caller's point of view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContactShareStatus {
    /// Whether the caller has already shared their card.
    pub shared: bool,
    /// The other party's card, when they shared it with the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<ContactShare>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_contact_request_validation() {
        let valid = ShareContactRequest {
            recipient_session_id: "s_0j3kfm2l9qpx7c4nvb81wzty".to_string(),
            full_name: "Ana Silva".to_string(),
            phone_number: "+1 415 555 0132".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_phone = ShareContactRequest {
            phone_number: "123".to_string(),
            ..valid.clone()
        };
        assert!(short_phone.validate().is_err());

        let no_name = ShareContactRequest {
            full_name: String::new(),
            ..valid
        };
        assert!(no_name.validate().is_err());
    }
}
