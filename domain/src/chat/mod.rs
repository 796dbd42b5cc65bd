//! Conversation domain types

pub mod entities;

pub use entities::{Media, Role, Turn};
