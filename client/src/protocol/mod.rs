//! Wire types for the login endpoint and the chat channel.

pub mod messages;

pub use messages::{ChatMessage, LoginRequest, LoginResponse};
