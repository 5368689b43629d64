use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin, trace_id,
    RateLimiterState,
};
use crate::routes::{
    contact_shares, events, feedback, health, likes, matches, messages, notifications, profiles,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Rate limiting is enabled when the per-minute budget is non-zero
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Attendee routes, scoped by the (event, session) headers and rate
    // limited per session
    let attendee_routes = Router::new()
        // Join flow
        .route("/api/v1/events/join", post(events::join_event))
        .route("/api/v1/session", get(events::session_status))
        // Profiles
        .route("/api/v1/profiles", post(profiles::create_profile))
        .route("/api/v1/profiles", get(profiles::discover_profiles))
        .route("/api/v1/profiles/me", get(profiles::get_own_profile))
        .route("/api/v1/profiles/me", put(profiles::update_own_profile))
        .route("/api/v1/profiles/me", delete(profiles::leave_event))
        // Likes and matches
        .route("/api/v1/likes", post(likes::create_like))
        .route("/api/v1/likes", get(likes::list_likes))
        .route("/api/v1/matches", get(matches::list_matches))
        // Chat
        .route("/api/v1/messages", post(messages::send_message))
        .route("/api/v1/messages", get(messages::load_conversation))
        .route("/api/v1/messages/read", post(messages::mark_conversation_read))
        .route("/api/v1/contact-shares", post(contact_shares::share_contact))
        .route("/api/v1/contact-shares", get(contact_shares::share_status))
        // Notification poll
        .route("/api/v1/notifications", get(notifications::poll_notifications))
        // Post-event feedback (event id travels in the body; the event is
        // usually expired by now)
        .route("/api/v1/feedback", post(feedback::submit_feedback))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // Organizer routes (require the admin key)
    let admin_routes = Router::new()
        .route("/api/v1/admin/events", post(events::create_event))
        .route("/api/v1/admin/events", get(events::list_events))
        .route("/api/v1/admin/events/:event_id", put(events::update_event))
        .route(
            "/api/v1/admin/events/:event_id",
            delete(events::delete_event),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Public routes (no headers required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(attendee_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(trace_id))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
