//! Event profile repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{EventProfileEntity, GenderIdentityDb, InterestedInDb, MatchedProfileEntity};
use crate::metrics::QueryTimer;

/// Fields for a new profile row.
#[derive(Debug, Clone)]
pub struct NewProfile<'a> {
    pub event_id: Uuid,
    pub session_id: &'a str,
    pub first_name: &'a str,
    pub age: i32,
    pub gender_identity: GenderIdentityDb,
    pub interested_in: InterestedInDb,
    pub interests: &'a [String],
    pub profile_photo_url: Option<&'a str>,
    pub profile_color: &'a str,
    pub bio: Option<&'a str>,
    pub height: Option<&'a str>,
}

/// Repository for profile-related database operations.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new profile.
    pub async fn create_profile(
        &self,
        profile: NewProfile<'_>,
    ) -> Result<EventProfileEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_profile");
        let result = sqlx::query_as::<_, EventProfileEntity>(
            r#"
            INSERT INTO event_profiles
                (event_id, session_id, first_name, age, gender_identity, interested_in,
                 interests, profile_photo_url, profile_color, bio, height)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, event_id, session_id, first_name, age, gender_identity, interested_in,
                      interests, profile_photo_url, profile_color, is_visible, bio, height, created_at
            "#,
        )
        .bind(profile.event_id)
        .bind(profile.session_id)
        .bind(profile.first_name)
        .bind(profile.age)
        .bind(profile.gender_identity)
        .bind(profile.interested_in)
        .bind(profile.interests)
        .bind(profile.profile_photo_url)
        .bind(profile.profile_color)
        .bind(profile.bio)
        .bind(profile.height)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a profile by (event, session).
    pub async fn find_by_session(
        &self,
        event_id: Uuid,
        session_id: &str,
    ) -> Result<Option<EventProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_profile_by_session");
        let result = sqlx::query_as::<_, EventProfileEntity>(
            r#"
            SELECT id, event_id, session_id, first_name, age, gender_identity, interested_in,
                   interests, profile_photo_url, profile_color, is_visible, bio, height, created_at
            FROM event_profiles
            WHERE event_id = $1 AND session_id = $2
            "#,
        )
        .bind(event_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether a profile exists for (event, session).
    pub async fn exists(&self, event_id: Uuid, session_id: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_profile_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM event_profiles WHERE event_id = $1 AND session_id = $2
            )
            "#,
        )
        .bind(event_id)
        .bind(session_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Visible profiles in an event, excluding the given session.
    pub async fn find_visible_in_event(
        &self,
        event_id: Uuid,
        excluding_session_id: &str,
    ) -> Result<Vec<EventProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_visible_profiles");
        let result = sqlx::query_as::<_, EventProfileEntity>(
            r#"
            SELECT id, event_id, session_id, first_name, age, gender_identity, interested_in,
                   interests, profile_photo_url, profile_color, is_visible, bio, height, created_at
            FROM event_profiles
            WHERE event_id = $1 AND is_visible = TRUE AND session_id <> $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(event_id)
        .bind(excluding_session_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update the owner's editable fields. COALESCE keeps omitted fields.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_profile(
        &self,
        event_id: Uuid,
        session_id: &str,
        first_name: Option<&str>,
        interests: Option<&[String]>,
        profile_photo_url: Option<&str>,
        bio: Option<&str>,
        height: Option<&str>,
        is_visible: Option<bool>,
    ) -> Result<Option<EventProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_profile");
        let result = sqlx::query_as::<_, EventProfileEntity>(
            r#"
            UPDATE event_profiles
            SET first_name = COALESCE($3, first_name),
                interests = COALESCE($4, interests),
                profile_photo_url = COALESCE($5, profile_photo_url),
                bio = COALESCE($6, bio),
                height = COALESCE($7, height),
                is_visible = COALESCE($8, is_visible)
            WHERE event_id = $1 AND session_id = $2
            RETURNING id, event_id, session_id, first_name, age, gender_identity, interested_in,
                      interests, profile_photo_url, profile_color, is_visible, bio, height, created_at
            "#,
        )
        .bind(event_id)
        .bind(session_id)
        .bind(first_name)
        .bind(interests)
        .bind(profile_photo_url)
        .bind(bio)
        .bind(height)
        .bind(is_visible)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete the caller's profile (leave event).
    pub async fn delete_by_session(
        &self,
        event_id: Uuid,
        session_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_profile");
        let result = sqlx::query(
            r#"
            DELETE FROM event_profiles
            WHERE event_id = $1 AND session_id = $2
            "#,
        )
        .bind(event_id)
        .bind(session_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// The caller's mutual matches: the other party's profile for every
    /// mutual like involving the session, each with its conversation's
    /// unread count for the caller.
    pub async fn find_matched_profiles(
        &self,
        event_id: Uuid,
        session_id: &str,
    ) -> Result<Vec<MatchedProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_matched_profiles");
        let result = sqlx::query_as::<_, MatchedProfileEntity>(
            r#"
            SELECT p.id, p.event_id, p.session_id, p.first_name, p.age, p.gender_identity,
                   p.interested_in, p.interests, p.profile_photo_url, p.profile_color,
                   p.is_visible, p.bio, p.height, p.created_at,
                   (SELECT COUNT(*) FROM messages m
                     WHERE m.event_id = p.event_id
                       AND m.receiver_session_id = $2
                       AND m.sender_session_id = p.session_id
                       AND m.is_read = FALSE) AS unread_count
            FROM event_profiles p
            WHERE p.event_id = $1
              AND p.session_id IN (
                    SELECT l.liked_session_id FROM likes l
                     WHERE l.event_id = $1 AND l.liker_session_id = $2 AND l.is_mutual = TRUE
                    UNION
                    SELECT l.liker_session_id FROM likes l
                     WHERE l.event_id = $1 AND l.liked_session_id = $2 AND l.is_mutual = TRUE
              )
            ORDER BY p.first_name ASC
            "#,
        )
        .bind(event_id)
        .bind(session_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
