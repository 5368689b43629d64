//! Event domain models for time-boxed gatherings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A time-boxed gathering attendees join via an access code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Event {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event is currently accepting attendees.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now < self.expires_at
    }

    /// Whether the event is past its expiry.
    pub fn has_ended_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Request to create a new event (organizer surface).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,

    /// Access code. Generated when omitted; normalized to uppercase.
    #[validate(regex(
        path = *EVENT_CODE_REGEX,
        message = "code must be 4-12 uppercase letters or digits"
    ))]
    pub code: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "location must be between 1 and 100 characters"
    ))]
    pub location: String,

    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CreateEventRequest {
    /// Schedule sanity check the field-level validator cannot express.
    pub fn validate_schedule(&self) -> Result<(), String> {
        if self.expires_at <= self.starts_at {
            return Err("expires_at must be after starts_at".to_string());
        }
        Ok(())
    }
}

/// Request to update an existing event. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "location must be between 1 and 100 characters"
    ))]
    pub location: Option<String>,

    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Request to join an event by access code.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct JoinEventRequest {
    #[validate(length(min = 1, max = 12, message = "code is required"))]
    pub code: String,
}

/// Response after a successful join lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct JoinEventResponse {
    pub event: Event,
    /// Whether the caller's session already has a profile for this event
    /// (returning attendee resume path).
    pub profile_exists: bool,
}

lazy_static::lazy_static! {
    static ref EVENT_CODE_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Z0-9]{4,12}$").unwrap();
}

/// Whether a (normalized) access code is well-formed.
pub fn is_valid_event_code(code: &str) -> bool {
    EVENT_CODE_REGEX.is_match(code)
}

/// Generate a random 6-character access code.
pub fn generate_event_code() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let chars: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789"; // Avoiding confusing chars: 0, O, I, 1

    (0..6)
        .map(|_| {
            let idx = rng.gen_range(0..chars.len());
            chars[idx] as char
        })
        .collect()
}
