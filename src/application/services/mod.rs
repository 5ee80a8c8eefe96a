//! Application services - Business logic orchestration

pub mod update_processor;

pub use update_processor::{Outcome, UpdateProcessor, GREETING_COMMAND};
