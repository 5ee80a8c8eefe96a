//! Domain entities - Core objects with no external dependencies

pub mod message;
pub mod weather;

pub use message::{ChatMessage, Content, OutboundReply};
pub use weather::{Condition, Current, Location, Weather};
