//! WebSocket connection
//!
//! The single bidirectional channel of an authenticated session. A
//! connection opens exactly once; its read task is the only writer of the
//! `MessageLog`; `close` is idempotent. Malformed inbound frames are dropped
//! with a log line so partial data never reaches the log and a bad payload
//! never tears down the session.

use crate::log::MessageLog;
use crate::protocol::ChatMessage;
use futures_util::SinkExt;
use futures_util::stream::{SplitSink, StreamExt};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Connection errors
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Send attempted while no open channel exists. Callers are expected to
    /// guard against this rather than discover it via transport errors.
    #[error("connection is not open")]
    NotOpen,

    #[error("WebSocket handshake failed: {0}")]
    Handshake(tungstenite::Error),

    #[error("WebSocket transport error: {0}")]
    Transport(#[from] tungstenite::Error),

    #[error("failed to encode outbound message: {0}")]
    Encode(#[from] serde_json::Error),
}

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// A live WebSocket connection to the chat endpoint
pub struct Connection {
    id: Uuid,
    sink: WsSink,
    read_task: JoinHandle<()>,
    closed: bool,
}

impl Connection {
    /// Connect to the chat endpoint and start the read task.
    ///
    /// Every well-formed inbound text frame is appended to `log` in the
    /// order the transport delivers it.
    pub async fn open(ws_url: &str, log: MessageLog) -> Result<Self, ConnectionError> {
        let (stream, _) = connect_async(ws_url)
            .await
            .map_err(ConnectionError::Handshake)?;

        let id = Uuid::new_v4();
        info!("WebSocket connection {} open: {}", id, ws_url);

        let (sink, mut source) = stream.split();

        let read_task = tokio::spawn(async move {
            while let Some(result) = source.next().await {
                match result {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<ChatMessage>(text.as_str()) {
                            Ok(message) => log.push(message).await,
                            Err(e) => {
                                warn!("Connection {}: dropping malformed frame: {}", id, e);
                            }
                        }
                    }
                    Ok(Message::Close(_)) => {
                        info!("Connection {}: server closed the channel", id);
                        break;
                    }
                    // Pings are answered by the transport; binary frames are
                    // not part of the protocol.
                    Ok(other) => {
                        debug!("Connection {}: ignoring frame: {:?}", id, other);
                    }
                    Err(e) => {
                        warn!("Connection {}: transport error: {}", id, e);
                        break;
                    }
                }
            }
        });

        Ok(Self {
            id,
            sink,
            read_task,
            closed: false,
        })
    }

    /// Whether the channel is still usable for sending
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Serialize a message and send it as a text frame
    pub async fn send(&mut self, message: &ChatMessage) -> Result<(), ConnectionError> {
        if self.closed {
            return Err(ConnectionError::NotOpen);
        }
        let json = serde_json::to_string(message)?;
        self.sink.send(Message::Text(json.into())).await?;
        Ok(())
    }

    /// Close the channel. Idempotent: the first call sends a close frame and
    /// stops the read task, later calls do nothing.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = self.sink.send(Message::Close(None)).await {
            debug!("Connection {}: close frame not delivered: {}", self.id, e);
        }
        self.read_task.abort();
        info!("Connection {} closed", self.id);
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Teardown paths that never reach close() still release the socket.
        self.read_task.abort();
    }
}
