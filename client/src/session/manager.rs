//! Session manager
//!
//! Owns the authentication state and the lifecycle of the single WebSocket
//! connection tied to it. The connection exists iff the session is
//! authenticated, opens exactly once per authenticated session, and is
//! closed on every exit path (logout or drop). Login failures are recovered
//! locally: the state stays `LoggedOut` and a warn-level line is the only
//! surface.

use crate::composer::Composer;
use crate::config::Config;
use crate::connection::{Connection, ConnectionError};
use crate::log::MessageLog;
use crate::protocol::{LoginRequest, LoginResponse};
use crate::session::state::SessionState;
use crate::session::store::AuthFlagStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Login errors. All recovered locally; the session stays logged out.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login rejected by server")]
    Rejected,

    #[error("login endpoint returned status {0}")]
    BadStatus(u16),

    #[error("malformed login response: {0}")]
    MalformedResponse(reqwest::Error),

    #[error("login transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Session manager: authentication state plus the owned connection
pub struct SessionManager {
    state: SessionState,
    config: Config,
    http: reqwest::Client,
    store: Arc<dyn AuthFlagStore>,
    connection: Option<Connection>,
    log: MessageLog,
    composer: Composer,
}

impl SessionManager {
    pub fn new(config: Config, store: Arc<dyn AuthFlagStore>) -> Self {
        Self {
            state: SessionState::LoggedOut,
            config,
            http: reqwest::Client::new(),
            store,
            connection: None,
            log: MessageLog::new(),
            composer: Composer::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn has_connection(&self) -> bool {
        self.connection.as_ref().is_some_and(Connection::is_open)
    }

    /// Shared handle to the message log
    pub fn log(&self) -> MessageLog {
        self.log.clone()
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    /// Send credentials to the login endpoint.
    ///
    /// On `{success: true}` the session becomes authenticated, the flag is
    /// persisted, and the connection is opened. On any failure the state is
    /// left untouched and the error is returned after a warn log line.
    /// Concurrent attempts are not deduplicated; last response wins.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&self.config.login_url)
            .json(&request)
            .send()
            .await
            .inspect_err(|e| warn!("Login transport failure: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Login endpoint returned status {}", status);
            return Err(AuthError::BadStatus(status.as_u16()));
        }

        let body: LoginResponse = response.json().await.map_err(|e| {
            warn!("Malformed login response: {}", e);
            AuthError::MalformedResponse(e)
        })?;

        if !body.success {
            warn!("Login failed for {}", username);
            return Err(AuthError::Rejected);
        }

        info!("Login successful for {}", username);
        self.state = SessionState::Authenticated;
        self.store.store();
        self.open_connection().await;
        Ok(())
    }

    /// Unconditionally revert to `LoggedOut`, clear the persisted flag and
    /// close any open connection. An in-flight login is not cancelled.
    pub async fn logout(&mut self) {
        self.state = SessionState::LoggedOut;
        self.store.clear();

        if let Some(mut connection) = self.connection.take() {
            connection.close().await;
        }
        info!("Logged out");
    }

    /// Restore the session from the persisted flag at startup.
    ///
    /// Trust-on-read: a stored `true` authenticates without contacting the
    /// server. Returns whether the session was restored.
    pub async fn restore(&mut self) -> bool {
        if !self.store.load() {
            return false;
        }
        info!("Restoring authenticated session from persisted flag");
        self.state = SessionState::Authenticated;
        self.open_connection().await;
        true
    }

    /// Submit the current draft over the connection.
    ///
    /// Blank drafts are a no-op (`Ok(false)`). A non-blank draft with no
    /// open connection is refused up front with `NotOpen`; the draft is kept.
    pub async fn submit(&mut self) -> Result<bool, ConnectionError> {
        if self.composer.is_blank() {
            return Ok(false);
        }
        let Some(connection) = self.connection.as_mut().filter(|c| c.is_open()) else {
            warn!("Refusing to send: no open connection");
            return Err(ConnectionError::NotOpen);
        };
        self.composer.submit(connection).await
    }

    /// Open the connection for the authenticated session. At most one
    /// connection exists per session; repeat calls are no-ops.
    async fn open_connection(&mut self) {
        if self.connection.is_some() {
            return;
        }
        match Connection::open(&self.config.ws_url, self.log.clone()).await {
            Ok(connection) => self.connection = Some(connection),
            // No reconnection or backoff: the session stays authenticated
            // but sends will be refused until the next login cycle.
            Err(e) => warn!("Failed to open connection to {}: {}", self.config.ws_url, e),
        }
    }
}
