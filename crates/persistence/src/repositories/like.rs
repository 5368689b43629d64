//! Like repository for database operations.
//!
//! Holds the mutual-match reconciliation queries. The two-record flip runs in
//! a single transaction so a half-flipped pair cannot be observed.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::LikeEntity;
use crate::metrics::QueryTimer;

const LIKE_COLUMNS: &str = "id, event_id, liker_session_id, liked_session_id, is_mutual, \
                            liker_notified_of_match, liked_notified_of_match, created_at";

/// Repository for like-related database operations.
#[derive(Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    /// Creates a new LikeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a like record, not yet mutual.
    ///
    /// The (event, liker, liked) unique key surfaces duplicate likes as a
    /// constraint violation.
    pub async fn create_like(
        &self,
        event_id: Uuid,
        liker_session_id: &str,
        liked_session_id: &str,
    ) -> Result<LikeEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_like");
        let result = sqlx::query_as::<_, LikeEntity>(&format!(
            r#"
            INSERT INTO likes (event_id, liker_session_id, liked_session_id)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            LIKE_COLUMNS
        ))
        .bind(event_id)
        .bind(liker_session_id)
        .bind(liked_session_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the reciprocal like (liked -> liker) for the same event.
    pub async fn find_reciprocal(
        &self,
        event_id: Uuid,
        liker_session_id: &str,
        liked_session_id: &str,
    ) -> Result<Option<LikeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_reciprocal_like");
        let result = sqlx::query_as::<_, LikeEntity>(&format!(
            r#"
            SELECT {}
            FROM likes
            WHERE event_id = $1 AND liker_session_id = $2 AND liked_session_id = $3
            "#,
            LIKE_COLUMNS
        ))
        .bind(event_id)
        .bind(liked_session_id)
        .bind(liker_session_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Flip both records of a completed pair to mutual, in one transaction.
    ///
    /// `own_like_id` is the record just created by the second liker (its
    /// liker-side flag flips: that party is being shown the match right now).
    /// `reciprocal_like_id` is the earlier record; its liked-side flag flips
    /// for the same reason.
    pub async fn mark_pair_mutual(
        &self,
        own_like_id: Uuid,
        reciprocal_like_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("mark_pair_mutual");
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE likes
            SET is_mutual = TRUE, liker_notified_of_match = TRUE
            WHERE id = $1
            "#,
        )
        .bind(own_like_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE likes
            SET is_mutual = TRUE, liked_notified_of_match = TRUE
            WHERE id = $1
            "#,
        )
        .bind(reciprocal_like_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(())
    }

    /// The session's outgoing like targets (the client-side dedup set).
    pub async fn liked_session_ids(
        &self,
        event_id: Uuid,
        liker_session_id: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("list_liked_session_ids");
        let result = sqlx::query_scalar::<_, String>(
            r#"
            SELECT liked_session_id
            FROM likes
            WHERE event_id = $1 AND liker_session_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(event_id)
        .bind(liker_session_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// First mutual like for which the given session has not yet been shown
    /// the match (its own side's notified flag is false).
    pub async fn find_unnotified_mutual(
        &self,
        event_id: Uuid,
        session_id: &str,
    ) -> Result<Option<LikeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_unnotified_mutual");
        let result = sqlx::query_as::<_, LikeEntity>(&format!(
            r#"
            SELECT {}
            FROM likes
            WHERE event_id = $1
              AND is_mutual = TRUE
              AND (
                    (liker_session_id = $2 AND liker_notified_of_match = FALSE)
                 OR (liked_session_id = $2 AND liked_notified_of_match = FALSE)
              )
            ORDER BY created_at ASC
            LIMIT 1
            "#,
            LIKE_COLUMNS
        ))
        .bind(event_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether any unnotified mutual like exists for the session (badge state).
    pub async fn has_unnotified_mutual(
        &self,
        event_id: Uuid,
        session_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_unnotified_mutual");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM likes
                WHERE event_id = $1
                  AND is_mutual = TRUE
                  AND (
                        (liker_session_id = $2 AND liker_notified_of_match = FALSE)
                     OR (liked_session_id = $2 AND liked_notified_of_match = FALSE)
                  )
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

    /// Mark the given session's side of a like record as notified.
    ///
    /// Idempotent: marking an already-true flag is a no-op.
    pub async fn mark_notified(&self, like_id: Uuid, session_id: &str) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("mark_like_notified");
        sqlx::query(
            r#"
            UPDATE likes
            SET liker_notified_of_match = liker_notified_of_match OR (liker_session_id = $2),
                liked_notified_of_match = liked_notified_of_match OR (liked_session_id = $2)
            WHERE id = $1
            "#,
        )
        .bind(like_id)
        .bind(session_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }

    /// Whether a mutual like exists between the two sessions.
    pub async fn pair_is_mutual(
        &self,
        event_id: Uuid,
        session_a: &str,
        session_b: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_pair_mutual");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM likes
                WHERE event_id = $1
                  AND is_mutual = TRUE
                  AND ((liker_session_id = $2 AND liked_session_id = $3)
                    OR (liker_session_id = $3 AND liked_session_id = $2))
            )
            "#,
        )
        .bind(event_id)
        .bind(session_a)
        .bind(session_b)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
