//! Shared types for the Event Admin service
//!
//! This crate contains the domain types and error taxonomy used across the
//! event admin components.

pub mod error;
pub mod event;

// Re-export commonly used types
pub use error::{ConfigError, StorageError};
pub use event::*;
