//! Custom Axum extractors.

pub mod session;

pub use session::{
    EventOnlyContext, OptionalSessionId, SessionContext, EVENT_ID_HEADER, SESSION_ID_HEADER,
};
