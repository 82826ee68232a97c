//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive
//! the [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (keyboard, resize, focus) and timers.
//! - Socket lifecycle notifications and frames from the transport.

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// The terminal regained focus.
    FocusGained,

    /// The socket opened.
    Opened,

    /// The socket closed, or failed to open.
    Closed,

    /// The transport reported an error. A [`AppEvent::Closed`] follows.
    TransportError {
        /// Error description.
        message: String,
    },

    /// One text frame from the server.
    FrameReceived(String),

    /// A scheduled reconnect delay elapsed.
    ReconnectDue,
}
