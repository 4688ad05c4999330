//! Message composer
//!
//! Holds the single pending draft. Empty or whitespace-only drafts are never
//! sent. A submitted message is not appended to the local log: the server
//! broadcasts every frame back to all clients, sender included, so the log
//! is fed only by that echo.

use crate::connection::{Connection, ConnectionError};
use crate::protocol::ChatMessage;
use chrono::Utc;

/// The user's in-progress, unsent message text
#[derive(Debug, Default)]
pub struct Composer {
    draft: String,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn clear(&mut self) {
        self.draft.clear();
    }

    /// Whether the draft is empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        self.draft.trim().is_empty()
    }

    /// Send the draft over the connection.
    ///
    /// Returns `Ok(false)` without sending if the draft is blank. On success
    /// the draft is cleared; on a send error it is kept for the user.
    pub async fn submit(&mut self, connection: &mut Connection) -> Result<bool, ConnectionError> {
        if self.is_blank() {
            return Ok(false);
        }

        let message = ChatMessage {
            content: self.draft.clone(),
            timestamp: now_utc_string(),
        };
        connection.send(&message).await?;
        self.draft.clear();
        Ok(true)
    }
}

/// Current wall-clock time as an RFC 1123 string,
/// e.g. `Mon, 01 Jan 2024 00:00:00 GMT`
pub fn now_utc_string() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_blank_detection() {
        let mut composer = Composer::new();
        assert!(composer.is_blank());

        composer.set_draft("  ");
        assert!(composer.is_blank());

        composer.set_draft("\t\n");
        assert!(composer.is_blank());

        composer.set_draft(" hi ");
        assert!(!composer.is_blank());
    }

    #[test]
    fn test_clear() {
        let mut composer = Composer::new();
        composer.set_draft("hello");
        composer.clear();
        assert_eq!(composer.draft(), "");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = now_utc_string();
        assert!(ts.ends_with(" GMT"));
        NaiveDateTime::parse_from_str(&ts, "%a, %d %b %Y %H:%M:%S GMT")
            .expect("timestamp should parse back");
    }
}
