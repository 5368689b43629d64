//! Repository implementations for database operations.

pub mod contact_share;
pub mod event;
pub mod feedback;
pub mod like;
pub mod message;
pub mod profile;

pub use contact_share::ContactShareRepository;
pub use event::EventRepository;
pub use feedback::{FeedbackRepository, NewFeedback};
pub use like::LikeRepository;
pub use message::MessageRepository;
pub use profile::{NewProfile, ProfileRepository};
