//! Append-only message log
//!
//! Inbound messages are pushed by the connection's read task (the single
//! writer); the presentation layer reads snapshots and watches the length
//! for new entries. Insertion order is display order; nothing is evicted.

use crate::protocol::ChatMessage;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};

/// Shared handle to the ordered log of chat messages
#[derive(Clone)]
pub struct MessageLog {
    inner: Arc<Inner>,
}

struct Inner {
    messages: RwLock<Vec<ChatMessage>>,
    len: watch::Sender<usize>,
}

impl MessageLog {
    pub fn new() -> Self {
        let (len, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                messages: RwLock::new(Vec::new()),
                len,
            }),
        }
    }

    /// Append a message and wake watchers
    pub async fn push(&self, message: ChatMessage) {
        let mut messages = self.inner.messages.write().await;
        messages.push(message);
        self.inner.len.send_replace(messages.len());
    }

    /// Clone of the full log in insertion order
    pub async fn snapshot(&self) -> Vec<ChatMessage> {
        self.inner.messages.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.messages.read().await.is_empty()
    }

    /// Receiver that observes the log length after each append
    pub fn watch_len(&self) -> watch::Receiver<usize> {
        self.inner.len.subscribe()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(content: &str) -> ChatMessage {
        ChatMessage {
            content: content.to_string(),
            timestamp: "Mon, 01 Jan 2024 00:00:00 GMT".to_string(),
        }
    }

    #[tokio::test]
    async fn test_push_preserves_insertion_order() {
        let log = MessageLog::new();
        log.push(msg("first")).await;
        log.push(msg("second")).await;
        log.push(msg("third")).await;

        let snapshot = log.snapshot().await;
        let contents: Vec<_> = snapshot.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached_from_log() {
        let log = MessageLog::new();
        log.push(msg("one")).await;

        let snapshot = log.snapshot().await;
        log.push(msg("two")).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len().await, 2);
    }

    #[tokio::test]
    async fn test_watch_len_observes_appends() {
        let log = MessageLog::new();
        let mut rx = log.watch_len();
        assert_eq!(*rx.borrow(), 0);

        log.push(msg("hello")).await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1);
    }

    #[tokio::test]
    async fn test_empty_log() {
        let log = MessageLog::new();
        assert!(log.is_empty().await);
        assert!(log.snapshot().await.is_empty());
    }
}
