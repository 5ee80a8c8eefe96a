//! Domain layer - Core types with no external dependencies
//!
//! This layer contains:
//! - Entities: Chat messages, replies and weather records
//! - Traits: Abstractions for infrastructure (Bot)

pub mod entities;
pub mod traits;
