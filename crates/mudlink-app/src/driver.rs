//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::{future::Future, time::Duration};

use crate::{App, AppEvent, Settings};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal client and in tests.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events, tokio-tungstenite for the
///   socket
/// - **Simulation**: Scripted events, recorded actions
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input event.
    ///
    /// Events cover keys, terminal changes, socket lifecycle, received frames
    /// and elapsed reconnect delays. Returns `None` when nothing happened
    /// within one tick.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Open a socket to `url`, closing any socket that is still live.
    ///
    /// Completion is reported later through [`AppEvent::Opened`] or
    /// [`AppEvent::Closed`].
    fn open(&mut self, url: &str);

    /// Transmit one text frame on the open socket.
    ///
    /// # Errors
    ///
    /// Returns an error if no socket is open or the socket task has exited.
    fn send_text(&mut self, text: String) -> Result<(), Self::Error>;

    /// Deliver [`AppEvent::ReconnectDue`] once `delay` has elapsed.
    fn schedule_reconnect(&mut self, delay: Duration);

    /// Persist settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    fn save_settings(&mut self, settings: &Settings) -> Result<(), Self::Error>;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the connection and clean up resources.
    fn stop(&mut self);
}
