//! Notification payloads for the poll endpoint.
//!
//! The service only decides *what* to surface; toast rendering and dismissal
//! live in the client. At most one payload of each kind is returned per poll.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::EventProfile;

/// A confirmed match the caller has not yet been shown.
///
/// Returning this payload marks the caller's side of the like record as
/// notified, so the same match is not surfaced twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchNotification {
    pub like_id: Uuid,
    pub matched_profile: EventProfile,
}

/// The most recent unread message, named by sender.
///
/// Nothing is marked read here; reading happens only on explicit chat view.
/// Clients keep an in-memory dismissed-set keyed by `message_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MessageNotification {
    pub message_id: Uuid,
    pub sender_session_id: String,
    pub sender_first_name: String,
    pub sent_at: DateTime<Utc>,
    pub unread_count: i64,
}

/// One poll's worth of notification state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NotificationsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_match: Option<MatchNotification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_message: Option<MessageNotification>,
    /// Badge state: any mutual match the caller has not been shown yet.
    pub has_unseen_matches: bool,
    /// Badge state: any unread message addressed to the caller.
    pub has_unread_messages: bool,
}
