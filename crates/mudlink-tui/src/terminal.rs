//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard and focus events and ratatui for rendering. The network side is
//! a tokio-tungstenite socket task per connection.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{
        DisableFocusChange, EnableFocusChange, Event, EventStream, KeyCode, KeyEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use mudlink_app::{App, AppEvent, Driver, KeyInput, Settings};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::{sync::mpsc, time::Instant};

use crate::{
    settings_store::{SettingsError, SettingsStore},
    transport::{self, Connection, TransportError, TransportEvent, TransportEventKind},
    ui,
};

const TICK: Duration = Duration::from_millis(100);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Settings could not be saved.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), the WebSocket
/// connection and the reconnect timer.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    connection: Option<Connection>,
    generation: u64,
    events_tx: mpsc::UnboundedSender<TransportEvent>,
    events_rx: mpsc::UnboundedReceiver<TransportEvent>,
    reconnect_at: Option<Instant>,
    store: SettingsStore,
}

impl TerminalDriver {
    /// Create a new terminal driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched to raw mode.
    pub fn new(store: SettingsStore) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(EnableFocusChange)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            event_stream,
            connection: None,
            generation: 0,
            events_tx,
            events_rx,
            reconnect_at: None,
            store,
        })
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            KeyCode::PageUp => Some(KeyInput::PageUp),
            KeyCode::PageDown => Some(KeyInput::PageDown),
            KeyCode::F(n) => Some(KeyInput::F(n)),
            _ => None,
        }
    }

    /// Convert a transport event, dropping events from superseded sockets.
    fn convert_transport(&mut self, event: TransportEvent) -> Option<AppEvent> {
        if event.generation != self.generation {
            tracing::debug!(stale = event.generation, live = self.generation, "dropping stale event");
            return None;
        }

        Some(match event.kind {
            TransportEventKind::Opened => AppEvent::Opened,
            TransportEventKind::Frame(text) => AppEvent::FrameReceived(text),
            TransportEventKind::Error(message) => AppEvent::TransportError { message },
            TransportEventKind::Closed => {
                self.connection = None;
                AppEvent::Closed
            },
        })
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let reconnect_at = self.reconnect_at;

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        Ok(Self::convert_key(key_event.code).map(AppEvent::Key))
                    },
                    Some(Ok(Event::Resize(cols, rows))) => Ok(Some(AppEvent::Resize(cols, rows))),
                    Some(Ok(Event::FocusGained)) => Ok(Some(AppEvent::FocusGained)),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(None),
                }
            }

            // Socket events
            Some(event) = self.events_rx.recv() => Ok(self.convert_transport(event)),

            // Reconnect timer
            () = async {
                match reconnect_at {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending().await,
                }
            } => {
                self.reconnect_at = None;
                Ok(Some(AppEvent::ReconnectDue))
            }

            // Tick timeout
            () = tokio::time::sleep(TICK) => Ok(Some(AppEvent::Tick)),
        }
    }

    fn open(&mut self, url: &str) {
        if let Some(old) = self.connection.take() {
            old.stop();
        }
        self.generation = self.generation.wrapping_add(1);
        self.connection = Some(transport::spawn(url.to_owned(), self.generation, self.events_tx.clone()));
    }

    fn send_text(&mut self, text: String) -> Result<(), Self::Error> {
        let conn = self.connection.as_ref().ok_or(TransportError::NotConnected)?;
        Ok(conn.send(text)?)
    }

    fn schedule_reconnect(&mut self, delay: Duration) {
        self.reconnect_at = Some(Instant::now() + delay);
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), Self::Error> {
        Ok(self.store.save(settings)?)
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(conn) = self.connection.take() {
            conn.stop();
        }
        self.reconnect_at = None;
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(DisableFocusChange);
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
