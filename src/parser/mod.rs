//! Input message parsing.

pub mod message;

pub use message::parse_message;
