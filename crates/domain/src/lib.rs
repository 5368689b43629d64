//! Domain layer for the Mixer backend.
//!
//! This crate contains:
//! - Domain models (Event, EventProfile, Like, Message, ContactShare, EventFeedback)
//! - Pure business logic (discovery filtering, notification payloads)

pub mod models;
pub mod services;
