//! Shared utilities and common types for the Mixer backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Identifier generation (session ids, conversation ids)
//! - Cryptographic utilities (hashing for the admin key check)

pub mod crypto;
pub mod ids;
