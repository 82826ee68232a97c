//! WebSocket transport.
//!
//! Provides [`Connection`] which owns one socket task. The task forwards text
//! frames in both directions and reports lifecycle changes as
//! [`TransportEvent`]s tagged with the connection generation, so events from
//! a replaced socket can be told apart from the live one.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Handshakes that take longer than this fail.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Opening the socket failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Reading or writing the open socket failed.
    #[error("stream error: {0}")]
    Stream(String),

    /// No socket task is running.
    #[error("not connected")]
    NotConnected,
}

/// Lifecycle and data notifications from a socket task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEventKind {
    /// Handshake completed.
    Opened,
    /// One text frame arrived.
    Frame(String),
    /// Something went wrong. `Closed` always follows.
    Error(String),
    /// The socket is gone.
    Closed,
}

/// A notification tagged with the generation of the socket that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportEvent {
    /// Generation of the producing socket.
    pub generation: u64,
    /// What happened.
    pub kind: TransportEventKind,
}

/// Handle to one socket task.
pub struct Connection {
    generation: u64,
    to_server: mpsc::UnboundedSender<String>,
    abort_handle: tokio::task::AbortHandle,
}

impl Connection {
    /// Generation of this socket.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Queue a text frame for the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket task has exited.
    pub fn send(&self, text: String) -> Result<(), TransportError> {
        self.to_server.send(text).map_err(|_| TransportError::NotConnected)
    }

    /// Stop the socket task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Open a socket to `url` in a spawned task.
///
/// Returns immediately. The outcome arrives on `events`.
pub fn spawn(url: String, generation: u64, events: mpsc::UnboundedSender<TransportEvent>) -> Connection {
    let (to_server_tx, to_server_rx) = mpsc::unbounded_channel::<String>();
    let handle = tokio::spawn(run_connection(url, generation, to_server_rx, events));

    Connection { generation, to_server: to_server_tx, abort_handle: handle.abort_handle() }
}

async fn run_connection(
    url: String,
    generation: u64,
    to_server: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<TransportEvent>,
) {
    let emit = |kind| {
        let _ = events.send(TransportEvent { generation, kind });
    };

    if let Err(e) = pump(&url, to_server, &emit).await {
        tracing::warn!(%url, error = %e, "socket failed");
        emit(TransportEventKind::Error(e.to_string()));
    }
    emit(TransportEventKind::Closed);
}

/// Drive one socket until either side closes it.
async fn pump(
    url: &str,
    mut to_server: mpsc::UnboundedReceiver<String>,
    emit: &impl Fn(TransportEventKind),
) -> Result<(), TransportError> {
    let (stream, _) = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(url))
        .await
        .map_err(|_| TransportError::Connection("handshake timed out".into()))?
        .map_err(|e| TransportError::Connection(e.to_string()))?;
    emit(TransportEventKind::Opened);

    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            outgoing = to_server.recv() => {
                let Some(text) = outgoing else {
                    let _ = sink.close().await;
                    return Ok(());
                };
                sink.send(Message::Text(text.into()))
                    .await
                    .map_err(|e| TransportError::Stream(e.to_string()))?;
            }

            incoming = source.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => emit(TransportEventKind::Frame(text.as_str().to_owned())),
                    Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                        Ok(text) => emit(TransportEventKind::Frame(text)),
                        Err(_) => tracing::debug!(len = bytes.len(), "dropping non-UTF-8 binary frame"),
                    },
                    Some(Ok(Message::Close(_))) | None => return Ok(()),
                    Some(Ok(_)) => {},
                    Some(Err(e)) => return Err(TransportError::Stream(e.to_string())),
                }
            }
        }
    }
}
