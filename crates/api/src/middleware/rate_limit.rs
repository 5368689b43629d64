//! Rate limiting middleware.
//!
//! Per-session request budgets. Two rapid like taps from the same device, or
//! two devices sharing a session, hit the same limiter; the store's unique
//! keys remain the correctness backstop.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, RwLock},
};

use crate::app::AppState;
use crate::extractors::SESSION_ID_HEADER;

/// Type alias for the rate limiter used per session.
type SessionRateLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across all requests.
/// Uses a HashMap keyed by session id with individual rate limiters.
pub struct RateLimiterState {
    limiters: RwLock<HashMap<String, Arc<SessionRateLimiter>>>,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a new rate limiter state with the specified limit per minute.
    pub fn new(rate_limit_per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            rate_limit_per_minute,
        }
    }

    /// Get or create a rate limiter for the given session id.
    fn get_or_create_limiter(&self, session_id: &str) -> Arc<SessionRateLimiter> {
        {
            let limiters = self.limiters.read().unwrap();
            if let Some(limiter) = limiters.get(session_id) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap();

        // Double-check in case another thread created it
        if let Some(limiter) = limiters.get(session_id) {
            return limiter.clone();
        }

        let quota = Quota::per_minute(
            NonZeroU32::new(self.rate_limit_per_minute).unwrap_or(NonZeroU32::new(120).unwrap()),
        );
        let limiter = Arc::new(GovRateLimiter::direct(quota));
        limiters.insert(session_id.to_string(), limiter.clone());
        limiter
    }

    /// Check if a request from the given session should be allowed.
    /// Returns Ok(()) if allowed, or Err with retry_after seconds if limited.
    pub fn check(&self, session_id: &str) -> Result<(), u64> {
        let limiter = self.get_or_create_limiter(session_id);

        match limiter.check() {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                Err(wait_time.as_secs().max(1))
            }
        }
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("active_limiters", &self.limiters.read().unwrap().len())
            .finish()
    }
}

/// Middleware that applies rate limiting per session.
///
/// Requests without a session header pass through untouched; the join and
/// health surfaces are not session-scoped.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(limiter) = state.rate_limiter.clone() else {
        return next.run(req).await;
    };

    let session_id = req
        .headers()
        .get(SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    if let Some(session_id) = session_id {
        if let Err(retry_after) = limiter.check(&session_id) {
            let body = Json(json!({
                "error": "rate_limited",
                "message": "Too many requests. Please try again later."
            }));
            let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            return response;
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_allows_within_quota() {
        let state = RateLimiterState::new(10);
        for _ in 0..10 {
            assert!(state.check("s_abc").is_ok());
        }
    }

    #[test]
    fn test_limiter_rejects_over_quota() {
        let state = RateLimiterState::new(2);
        assert!(state.check("s_abc").is_ok());
        assert!(state.check("s_abc").is_ok());
        assert!(state.check("s_abc").is_err());
    }

    #[test]
    fn test_limiter_isolated_per_session() {
        let state = RateLimiterState::new(1);
        assert!(state.check("s_one").is_ok());
        assert!(state.check("s_two").is_ok());
        assert!(state.check("s_one").is_err());
    }
}
