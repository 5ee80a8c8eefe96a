//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Update processing
//! - Errors: Transport, API and config errors
//! - Messaging: Message parsing and reply texts

pub mod errors;
pub mod messaging;
pub mod services;
