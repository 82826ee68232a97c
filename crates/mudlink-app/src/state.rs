//! Observable application state types.
//!
//! This module defines the data structures the renderer reads: the
//! connection status, the scrolling output buffer and the panel selection.
//! Nothing here performs I/O.

use std::collections::VecDeque;

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No socket is open.
    Disconnected,
    /// A socket is being opened.
    Connecting,
    /// The socket is open.
    Connected,
}

impl ConnectionState {
    /// Status bar label.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connecting => "Connecting...",
            ConnectionState::Connected => "Connected",
        }
    }
}

/// Visual presentation of an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Ordinary game text.
    Plain,
    /// Errors from the server or the client.
    Error,
    /// Notices from the client or the server.
    System,
    /// Announcements to every player.
    Broadcast,
    /// Room descriptions.
    Location,
    /// Speech from other players.
    Chat,
    /// Echo of a command the player typed.
    CommandEcho,
}

/// One line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Line text. May carry ANSI colour codes.
    pub text: String,
    /// Presentation.
    pub kind: LineKind,
}

/// Scrollback buffer, oldest line first.
#[derive(Debug, Clone)]
pub struct Output {
    lines: VecDeque<OutputLine>,
    capacity: usize,
}

impl Output {
    /// Create an empty buffer holding at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self { lines: VecDeque::new(), capacity: capacity.max(1) }
    }

    /// Append a line, dropping the oldest one when full.
    pub fn push(&mut self, text: impl Into<String>, kind: LineKind) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(OutputLine { text: text.into(), kind });
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines, oldest first.
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &OutputLine> + ExactSizeIterator {
        self.lines.iter()
    }

    /// Number of buffered lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when no lines are buffered.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Most recent line.
    pub fn last(&self) -> Option<&OutputLine> {
        self.lines.back()
    }
}

/// Side panel shown next to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Recent command history.
    History,
    /// Inventory and equipment.
    Inventory,
    /// Map grid.
    Map,
    /// Key bindings and local commands.
    Help,
}

impl Panel {
    /// Next panel in Tab order.
    pub fn next(self) -> Self {
        match self {
            Panel::History => Panel::Inventory,
            Panel::Inventory => Panel::Map,
            Panel::Map => Panel::Help,
            Panel::Help => Panel::History,
        }
    }

    /// Panel title.
    pub fn title(self) -> &'static str {
        match self {
            Panel::History => "History",
            Panel::Inventory => "Inventory",
            Panel::Map => "Map",
            Panel::Help => "Help",
        }
    }
}

/// Colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Light text on a dark background.
    Dark,
    /// Dark text on a light background.
    Light,
}

impl Theme {
    /// Label of the control that switches away from this theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light Mode",
            Theme::Light => "Dark Mode",
        }
    }
}
