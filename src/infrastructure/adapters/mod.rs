//! Chat platform adapters

pub mod console;
pub mod telegram;
