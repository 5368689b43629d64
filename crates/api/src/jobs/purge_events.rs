//! Expired-event purge background job.
//!
//! Attendee data is ephemeral: once an event has been expired for the
//! configured grace period, profiles, likes, messages, and contact shares
//! are deleted. The event row and its feedback stay, since feedback arrives
//! after expiry; an organizer delete remains the full cascade.

use chrono::{Duration, Utc};
use persistence::repositories::EventRepository;
use sqlx::PgPool;
use tracing::info;

use super::scheduler::{Job, JobFrequency};

/// Background job that purges attendee records of expired events.
pub struct PurgeExpiredEventsJob {
    events: EventRepository,
    grace_hours: u32,
}

impl PurgeExpiredEventsJob {
    /// Create a new purge job.
    ///
    /// # Arguments
    /// * `pool` - Database connection pool
    /// * `grace_hours` - Hours past expiry before records are purged
    pub fn new(pool: PgPool, grace_hours: u32) -> Self {
        Self {
            events: EventRepository::new(pool),
            grace_hours,
        }
    }
}

#[async_trait::async_trait]
impl Job for PurgeExpiredEventsJob {
    fn name(&self) -> &'static str {
        "purge_expired_events"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Hourly
    }

    async fn execute(&self) -> Result<(), String> {
        let cutoff = Utc::now() - Duration::hours(self.grace_hours as i64);

        let event_ids = self
            .events
            .find_purgeable_events(cutoff)
            .await
            .map_err(|e| format!("Failed to find purgeable events: {}", e))?;

        if event_ids.is_empty() {
            return Ok(());
        }

        let mut total_deleted: u64 = 0;
        for event_id in &event_ids {
            let deleted = self
                .events
                .purge_attendee_records(*event_id)
                .await
                .map_err(|e| format!("Failed to purge event {}: {}", event_id, e))?;
            total_deleted += deleted;
        }

        info!(
            events = event_ids.len(),
            deleted = total_deleted,
            grace_hours = self.grace_hours,
            "Purged attendee records of expired events"
        );

        Ok(())
    }
}
