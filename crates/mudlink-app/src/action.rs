//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use std::time::Duration;

use mudlink_proto::ClientFrame;

use crate::Settings;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Open a socket, closing any socket that is still live.
    Connect {
        /// WebSocket URL.
        url: String,
    },

    /// Transmit a frame on the open socket.
    Send(ClientFrame),

    /// Deliver [`crate::AppEvent::ReconnectDue`] after `delay`.
    ScheduleReconnect {
        /// Delay before the attempt.
        delay: Duration,
    },

    /// Persist settings.
    SaveSettings(Settings),
}
