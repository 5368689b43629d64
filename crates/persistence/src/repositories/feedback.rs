//! Event feedback repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventFeedbackEntity;
use crate::metrics::QueryTimer;

/// Fields for a new feedback row.
#[derive(Debug, Clone)]
pub struct NewFeedback<'a> {
    pub event_id: Uuid,
    pub session_id: &'a str,
    pub rating_profile_setup: i32,
    pub rating_interests_helpful: i32,
    pub rating_social_usefulness: i32,
    pub met_match_in_person: bool,
    pub open_to_other_event_types: bool,
    pub match_experience_feedback: &'a str,
    pub general_feedback: Option<&'a str>,
}

/// Repository for feedback database operations.
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    /// Creates a new FeedbackRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a feedback submission. One per (event, session); a repeat
    /// violates the unique key.
    pub async fn create_feedback(
        &self,
        feedback: NewFeedback<'_>,
    ) -> Result<EventFeedbackEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_feedback");
        let result = sqlx::query_as::<_, EventFeedbackEntity>(
            r#"
            INSERT INTO event_feedback
                (event_id, session_id, rating_profile_setup, rating_interests_helpful,
                 rating_social_usefulness, met_match_in_person, open_to_other_event_types,
                 match_experience_feedback, general_feedback)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, event_id, session_id, rating_profile_setup, rating_interests_helpful,
                      rating_social_usefulness, met_match_in_person, open_to_other_event_types,
                      match_experience_feedback, general_feedback, created_at
            "#,
        )
        .bind(feedback.event_id)
        .bind(feedback.session_id)
        .bind(feedback.rating_profile_setup)
        .bind(feedback.rating_interests_helpful)
        .bind(feedback.rating_social_usefulness)
        .bind(feedback.met_match_in_person)
        .bind(feedback.open_to_other_event_types)
        .bind(feedback.match_experience_feedback)
        .bind(feedback.general_feedback)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: FeedbackRepository tests require a database connection and are
    // covered by integration tests in crates/api/tests.
}
