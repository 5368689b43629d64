//! Organizer key check for admin routes.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;

/// Header carrying the organizer key.
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Middleware guarding /api/v1/admin routes.
///
/// The provided key is compared against the configured key via SHA-256
/// digests. Full account-based auth is an external collaborator; this is the
/// minimal organizer gate.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let provided = req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    let Some(provided) = provided else {
        return ApiError::Unauthorized(format!("Missing {} header", ADMIN_KEY_HEADER))
            .into_response();
    };

    if !shared::crypto::digests_match(provided, &state.config.security.admin_api_key) {
        return ApiError::Forbidden("Invalid admin key".to_string()).into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_key_header_constant() {
        assert_eq!(ADMIN_KEY_HEADER, "X-Admin-Key");
    }
}
