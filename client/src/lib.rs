//! Parley Chat Client Library
//!
//! This module exports the client components for use in integration tests
//! and external tooling.

pub mod composer;
pub mod config;
pub mod connection;
pub mod log;
pub mod protocol;
pub mod session;

// Re-export commonly used types
pub use composer::Composer;
pub use config::Config;
pub use connection::{Connection, ConnectionError};
pub use log::MessageLog;
pub use protocol::{ChatMessage, LoginRequest, LoginResponse};
pub use session::manager::{AuthError, SessionManager};
pub use session::state::SessionState;
pub use session::store::{AuthFlagStore, FileAuthFlagStore, MemoryAuthFlagStore};
