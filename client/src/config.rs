//! Client configuration
//!
//! Configuration is loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Main client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Login endpoint URL
    pub login_url: String,
    /// WebSocket endpoint URL
    pub ws_url: String,
    /// Path of the persisted authentication flag file
    pub state_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            login_url: "http://localhost:8000/login".to_string(),
            ws_url: "ws://localhost:8000/ws".to_string(),
            state_file: env::temp_dir().join("parley").join("authenticated"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("PARLEY_LOGIN_URL")
            && !url.is_empty()
        {
            config.login_url = url;
        }
        if let Ok(url) = env::var("PARLEY_WS_URL")
            && !url.is_empty()
        {
            config.ws_url = url;
        }
        if let Ok(path) = env::var("PARLEY_STATE_FILE")
            && !path.is_empty()
        {
            config.state_file = PathBuf::from(path);
        }

        config
    }
}
