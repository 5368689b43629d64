//! Event repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventEntity;
use crate::metrics::QueryTimer;

/// Repository for event-related database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_event(
        &self,
        code: &str,
        name: &str,
        location: &str,
        description: Option<&str>,
        starts_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events (code, name, location, description, starts_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, code, name, location, description, starts_at, expires_at, created_at
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(location)
        .bind(description)
        .bind(starts_at)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, code, name, location, description, starts_at, expires_at, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find event by access code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_code");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, code, name, location, description, starts_at, expires_at, created_at
            FROM events
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all events, newest first.
    pub async fn list_events(&self) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, code, name, location, description, starts_at, expires_at, created_at
            FROM events
            ORDER BY starts_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an event's editable fields. COALESCE keeps omitted fields.
    pub async fn update_event(
        &self,
        id: Uuid,
        name: Option<&str>,
        location: Option<&str>,
        description: Option<&str>,
        starts_at: Option<DateTime<Utc>>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                description = COALESCE($4, description),
                starts_at = COALESCE($5, starts_at),
                expires_at = COALESCE($6, expires_at)
            WHERE id = $1
            RETURNING id, code, name, location, description, starts_at, expires_at, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(location)
        .bind(description)
        .bind(starts_at)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an event. Cascades through foreign keys to all dependent rows.
    pub async fn delete_event(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Check if an access code exists.
    pub async fn code_exists(&self, code: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_event_code_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM events WHERE code = $1)
            "#,
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Generate a unique access code by retrying on collision.
    pub async fn generate_unique_code<F>(&self, generator: F) -> Result<String, sqlx::Error>
    where
        F: Fn() -> String,
    {
        let mut code = generator();
        let mut attempts = 0;

        while self.code_exists(&code).await? {
            code = generator();
            attempts += 1;
            if attempts > 100 {
                return Err(sqlx::Error::Protocol(
                    "Could not generate unique event code".to_string(),
                ));
            }
        }

        Ok(code)
    }

    /// Events whose expiry is older than the given cutoff and which still
    /// have attendee records left to purge.
    pub async fn find_purgeable_events(
        &self,
        expired_before: DateTime<Utc>,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("find_purgeable_events");
        let result = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT e.id
            FROM events e
            WHERE e.expires_at < $1
              AND (
                    EXISTS(SELECT 1 FROM event_profiles p WHERE p.event_id = e.id)
                 OR EXISTS(SELECT 1 FROM likes l WHERE l.event_id = e.id)
                 OR EXISTS(SELECT 1 FROM messages m WHERE m.event_id = e.id)
                 OR EXISTS(SELECT 1 FROM contact_shares c WHERE c.event_id = e.id)
              )
            "#,
        )
        .bind(expired_before)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete all attendee records for an expired event. The event row and
    /// its feedback are kept.
    pub async fn purge_attendee_records(&self, event_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("purge_attendee_records");
        let mut total: u64 = 0;

        for table in ["messages", "contact_shares", "likes", "event_profiles"] {
            let result = sqlx::query(&format!("DELETE FROM {} WHERE event_id = $1", table))
                .bind(event_id)
                .execute(&self.pool)
                .await?;
            total += result.rows_affected();
        }

        timer.record();
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    // Note: EventRepository tests require a database connection and are
    // covered by integration tests in crates/api/tests.
}
