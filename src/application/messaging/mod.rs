//! Message handling - parsing inbound text and formatting replies

pub mod parser;
pub mod replies;

pub use parser::MessageParser;
