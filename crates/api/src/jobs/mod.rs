//! Background job scheduler and job implementations.

mod pool_metrics;
mod purge_events;
mod scheduler;

pub use pool_metrics::PoolMetricsJob;
pub use purge_events::PurgeExpiredEventsJob;
pub use scheduler::JobScheduler;
