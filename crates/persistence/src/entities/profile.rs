//! Event profile entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::profile::{EventProfile, GenderIdentity, InterestedIn};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping for gender identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "gender_identity", rename_all = "kebab-case")]
pub enum GenderIdentityDb {
    Man,
    Woman,
    NonBinary,
}

impl From<GenderIdentityDb> for GenderIdentity {
    fn from(db: GenderIdentityDb) -> Self {
        match db {
            GenderIdentityDb::Man => GenderIdentity::Man,
            GenderIdentityDb::Woman => GenderIdentity::Woman,
            GenderIdentityDb::NonBinary => GenderIdentity::NonBinary,
        }
    }
}

impl From<GenderIdentity> for GenderIdentityDb {
    fn from(model: GenderIdentity) -> Self {
        match model {
            GenderIdentity::Man => GenderIdentityDb::Man,
            GenderIdentity::Woman => GenderIdentityDb::Woman,
            GenderIdentity::NonBinary => GenderIdentityDb::NonBinary,
        }
    }
}

/// Database enum mapping for discovery preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "interested_in", rename_all = "kebab-case")]
pub enum InterestedInDb {
    Men,
    Women,
    NonBinary,
    Everyone,
}

impl From<InterestedInDb> for InterestedIn {
    fn from(db: InterestedInDb) -> Self {
        match db {
            InterestedInDb::Men => InterestedIn::Men,
            InterestedInDb::Women => InterestedIn::Women,
            InterestedInDb::NonBinary => InterestedIn::NonBinary,
            InterestedInDb::Everyone => InterestedIn::Everyone,
        }
    }
}

impl From<InterestedIn> for InterestedInDb {
    fn from(model: InterestedIn) -> Self {
        match model {
            InterestedIn::Men => InterestedInDb::Men,
            InterestedIn::Women => InterestedInDb::Women,
            InterestedIn::NonBinary => InterestedInDb::NonBinary,
            InterestedIn::Everyone => InterestedInDb::Everyone,
        }
    }
}

/// Database row mapping for the event_profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct EventProfileEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub session_id: String,
    pub first_name: String,
    pub age: i32,
    pub gender_identity: GenderIdentityDb,
    pub interested_in: InterestedInDb,
    pub interests: Vec<String>,
    pub profile_photo_url: Option<String>,
    pub profile_color: String,
    pub is_visible: bool,
    pub bio: Option<String>,
    pub height: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EventProfileEntity> for EventProfile {
    fn from(entity: EventProfileEntity) -> Self {
        EventProfile {
            id: entity.id,
            event_id: entity.event_id,
            session_id: entity.session_id,
            first_name: entity.first_name,
            age: entity.age,
            gender_identity: entity.gender_identity.into(),
            interested_in: entity.interested_in.into(),
            interests: entity.interests,
            profile_photo_url: entity.profile_photo_url,
            profile_color: entity.profile_color,
            is_visible: entity.is_visible,
            bio: entity.bio,
            height: entity.height,
            created_at: entity.created_at,
        }
    }
}

/// Profile row joined with the per-match unread message count, for the
/// matches listing.
#[derive(Debug, Clone, FromRow)]
pub struct MatchedProfileEntity {
    #[sqlx(flatten)]
    pub profile: EventProfileEntity,
    pub unread_count: i64,
}
