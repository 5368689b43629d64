//! Contact share repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ContactShareEntity;
use crate::metrics::QueryTimer;

const SHARE_COLUMNS: &str = "id, event_id, match_id, sharer_session_id, recipient_session_id, \
                             full_name, phone_number, created_at";

/// Repository for contact-share database operations.
#[derive(Clone)]
pub struct ContactShareRepository {
    pool: PgPool,
}

impl ContactShareRepository {
    /// Creates a new ContactShareRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a one-time contact share. A repeat from the same side violates
    /// the (event, match, sharer) unique key.
    pub async fn create_share(
        &self,
        event_id: Uuid,
        match_id: &str,
        sharer_session_id: &str,
        recipient_session_id: &str,
        full_name: &str,
        phone_number: &str,
    ) -> Result<ContactShareEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_contact_share");
        let result = sqlx::query_as::<_, ContactShareEntity>(&format!(
            r#"
            INSERT INTO contact_shares
                (event_id, match_id, sharer_session_id, recipient_session_id, full_name, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            SHARE_COLUMNS
        ))
        .bind(event_id)
        .bind(match_id)
        .bind(sharer_session_id)
        .bind(recipient_session_id)
        .bind(full_name)
        .bind(phone_number)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Both sides' shares for a conversation, if any.
    pub async fn find_for_match(
        &self,
        event_id: Uuid,
        match_id: &str,
    ) -> Result<Vec<ContactShareEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_shares_for_match");
        let result = sqlx::query_as::<_, ContactShareEntity>(&format!(
            r#"
            SELECT {}
            FROM contact_shares
            WHERE event_id = $1 AND match_id = $2
            "#,
            SHARE_COLUMNS
        ))
        .bind(event_id)
        .bind(match_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: ContactShareRepository tests require a database connection and
    // are covered by integration tests in crates/api/tests.
}
