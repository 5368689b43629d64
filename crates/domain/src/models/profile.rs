//! Event profile domain models.
//!
//! A profile is the attendee's event-scoped public identity, keyed by an
//! ephemeral session id. One profile per (event, session), enforced by the
//! store's composite unique key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Gender identity options for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenderIdentity {
    Man,
    Woman,
    NonBinary,
}

impl GenderIdentity {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderIdentity::Man => "man",
            GenderIdentity::Woman => "woman",
            GenderIdentity::NonBinary => "non-binary",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "man" => Some(GenderIdentity::Man),
            "woman" => Some(GenderIdentity::Woman),
            "non-binary" => Some(GenderIdentity::NonBinary),
            _ => None,
        }
    }
}

impl std::fmt::Display for GenderIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who the attendee wants to be discovered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterestedIn {
    Men,
    Women,
    NonBinary,
    Everyone,
}

impl InterestedIn {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestedIn::Men => "men",
            InterestedIn::Women => "women",
            InterestedIn::NonBinary => "non-binary",
            InterestedIn::Everyone => "everyone",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "men" => Some(InterestedIn::Men),
            "women" => Some(InterestedIn::Women),
            "non-binary" => Some(InterestedIn::NonBinary),
            "everyone" => Some(InterestedIn::Everyone),
            _ => None,
        }
    }

    /// Whether this preference includes the given gender identity.
    pub fn includes(&self, gender: GenderIdentity) -> bool {
        match self {
            InterestedIn::Everyone => true,
            InterestedIn::Men => gender == GenderIdentity::Man,
            InterestedIn::Women => gender == GenderIdentity::Woman,
            InterestedIn::NonBinary => gender == GenderIdentity::NonBinary,
        }
    }
}

impl std::fmt::Display for InterestedIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The attendee's event-scoped public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventProfile {
    pub id: Uuid,
    pub event_id: Uuid,
    pub session_id: String,
    pub first_name: String,
    pub age: i32,
    pub gender_identity: GenderIdentity,
    pub interested_in: InterestedIn,
    pub interests: Vec<String>,
    pub profile_photo_url: Option<String>,
    pub profile_color: String,
    pub is_visible: bool,
    pub bio: Option<String>,
    pub height: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to create a profile when joining an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateProfileRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "first_name must be between 1 and 50 characters"
    ))]
    pub first_name: String,

    #[validate(range(min = 18, max = 120, message = "age must be between 18 and 120"))]
    pub age: i32,

    pub gender_identity: GenderIdentity,
    pub interested_in: InterestedIn,

    #[validate(length(max = 10, message = "at most 10 interests"))]
    #[serde(default)]
    pub interests: Vec<String>,

    #[validate(url(message = "profile_photo_url must be a valid URL"))]
    pub profile_photo_url: Option<String>,

    /// Chosen when omitted.
    pub profile_color: Option<String>,

    #[validate(length(max = 500, message = "bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 20, message = "height must be at most 20 characters"))]
    pub height: Option<String>,
}

/// Request to update the caller's own profile. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "first_name must be between 1 and 50 characters"
    ))]
    pub first_name: Option<String>,

    #[validate(length(max = 10, message = "at most 10 interests"))]
    pub interests: Option<Vec<String>>,

    #[validate(url(message = "profile_photo_url must be a valid URL"))]
    pub profile_photo_url: Option<String>,

    #[validate(length(max = 500, message = "bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 20, message = "height must be at most 20 characters"))]
    pub height: Option<String>,

    pub is_visible: Option<bool>,
}

/// Response after creating a profile. Carries the issued session id the client
/// must persist for all later calls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateProfileResponse {
    pub session_id: String,
    pub profile: EventProfile,
}

/// Avatar fallback palette, used when no photo is uploaded.
pub const PROFILE_COLORS: &[&str] = &[
    "#e63946", "#f4a261", "#e9c46a", "#2a9d8f", "#264653", "#9b5de5", "#f15bb5", "#00bbf9",
];

/// Pick a random avatar color.
pub fn pick_profile_color() -> String {
    use rand::seq::SliceRandom;
    let mut rng = rand::thread_rng();
    PROFILE_COLORS
        .choose(&mut rng)
        .copied()
        .unwrap_or("#2a9d8f")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_identity_round_trip() {
        for g in [
            GenderIdentity::Man,
            GenderIdentity::Woman,
            GenderIdentity::NonBinary,
        ] {
            assert_eq!(GenderIdentity::parse(g.as_str()), Some(g));
        }
        assert_eq!(GenderIdentity::parse("robot"), None);
    }

    #[test]
    fn test_interested_in_round_trip() {
        for i in [
            InterestedIn::Men,
            InterestedIn::Women,
            InterestedIn::NonBinary,
            InterestedIn::Everyone,
        ] {
            assert_eq!(InterestedIn::parse(i.as_str()), Some(i));
        }
        assert_eq!(InterestedIn::parse(""), None);
    }

    #[test]
    fn test_interested_in_includes() {
        assert!(InterestedIn::Everyone.includes(GenderIdentity::Man));
        assert!(InterestedIn::Everyone.includes(GenderIdentity::NonBinary));
        assert!(InterestedIn::Men.includes(GenderIdentity::Man));
        assert!(!InterestedIn::Men.includes(GenderIdentity::Woman));
        assert!(InterestedIn::Women.includes(GenderIdentity::Woman));
        assert!(!InterestedIn::Women.includes(GenderIdentity::NonBinary));
        assert!(InterestedIn::NonBinary.includes(GenderIdentity::NonBinary));
        assert!(!InterestedIn::NonBinary.includes(GenderIdentity::Man));
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&GenderIdentity::NonBinary).unwrap();
        assert_eq!(json, "\"non-binary\"");
        let parsed: InterestedIn = serde_json::from_str("\"everyone\"").unwrap();
        assert_eq!(parsed, InterestedIn::Everyone);
    }

    #[test]
    fn test_pick_profile_color_from_palette() {
        for _ in 0..20 {
            let color = pick_profile_color();
            assert!(PROFILE_COLORS.contains(&color.as_str()));
        }
    }

    #[test]
    fn test_create_profile_request_validation() {
        let valid = CreateProfileRequest {
            first_name: "Ana".to_string(),
            age: 27,
            gender_identity: GenderIdentity::Woman,
            interested_in: InterestedIn::Everyone,
            interests: vec!["music".to_string(), "hiking".to_string()],
            profile_photo_url: None,
            profile_color: None,
            bio: Some("Here for the playlist".to_string()),
            height: None,
        };
        assert!(valid.validate().is_ok());

        let underage = CreateProfileRequest {
            age: 17,
            ..valid.clone()
        };
        assert!(underage.validate().is_err());

        let no_name = CreateProfileRequest {
            first_name: String::new(),
            ..valid.clone()
        };
        assert!(no_name.validate().is_err());

        let too_many_interests = CreateProfileRequest {
            interests: (0..11).map(|i| format!("interest{}", i)).collect(),
            ..valid
        };
        assert!(too_many_interests.validate().is_err());
    }
}
