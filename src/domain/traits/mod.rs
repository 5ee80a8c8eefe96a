//! Domain traits - Abstractions implemented by infrastructure

pub mod bot;

pub use bot::{Bot, BotInfo};
