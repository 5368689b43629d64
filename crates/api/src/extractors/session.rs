//! Session context extractor.
//!
//! Every attendee endpoint is scoped by the pair (event id, session id),
//! carried in request headers. Absence of either is a terminal precondition
//! failure: the 401 `no_session` response tells the client to send the user
//! back through the join flow.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the active event id.
pub const EVENT_ID_HEADER: &str = "X-Event-Id";

/// Header carrying the caller's ephemeral session id.
pub const SESSION_ID_HEADER: &str = "X-Session-Id";

/// The two identifiers that scope every attendee operation.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub event_id: Uuid,
    pub session_id: String,
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let event_id = header_value(parts, EVENT_ID_HEADER).ok_or_else(|| {
            ApiError::Unauthorized(format!("Missing {} header; join an event first", EVENT_ID_HEADER))
        })?;
        let session_id = header_value(parts, SESSION_ID_HEADER).ok_or_else(|| {
            ApiError::Unauthorized(format!(
                "Missing {} header; join an event first",
                SESSION_ID_HEADER
            ))
        })?;

        let event_id = Uuid::parse_str(&event_id).map_err(|_| {
            ApiError::Unauthorized(format!("{} is not a valid event id", EVENT_ID_HEADER))
        })?;

        Ok(SessionContext {
            event_id,
            session_id,
        })
    }
}

/// Event scope without a session, for the one endpoint that runs before a
/// session exists: profile creation, where the session id is issued.
#[derive(Debug, Clone)]
pub struct EventOnlyContext {
    pub event_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for EventOnlyContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let event_id = header_value(parts, EVENT_ID_HEADER).ok_or_else(|| {
            ApiError::Unauthorized(format!("Missing {} header; join an event first", EVENT_ID_HEADER))
        })?;
        let event_id = Uuid::parse_str(&event_id).map_err(|_| {
            ApiError::Unauthorized(format!("{} is not a valid event id", EVENT_ID_HEADER))
        })?;

        Ok(EventOnlyContext { event_id })
    }
}

/// Optional session id, for endpoints reachable before a profile exists
/// (event join) or after the event ended (feedback).
#[derive(Debug, Clone)]
pub struct OptionalSessionId(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalSessionId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalSessionId(header_value(parts, SESSION_ID_HEADER)))
    }
}
