//! Telegram bot that replies to a city name with the current weather and
//! clothing advice from a language model.

pub mod application;
pub mod domain;
pub mod infrastructure;
