//! Configuration management for the Event Admin service
//!
//! This crate handles extraction, coercion, and validation of configuration
//! from process environment variables. Validation is aggregating: every
//! missing or malformed variable is reported in a single fatal error.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigLoader;
pub use schema::*;
pub use validation::*;
