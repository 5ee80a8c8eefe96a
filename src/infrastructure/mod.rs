//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Logging: Subscriber setup
//! - Weather / LLM: Outbound API clients
//! - Adapters: Platform integrations (Telegram, console)

pub mod adapters;
pub mod config;
pub mod llm;
pub mod logging;
pub mod weather;
