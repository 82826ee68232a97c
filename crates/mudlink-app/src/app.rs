//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the interactive
//! state of the client completely decoupled from terminal and socket I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Connection lifecycle and the reconnect policy.
//! - The output buffer, command history and the input line.
//! - Side panel selection and the map and inventory caches.
//! - Local slash commands and persisted settings.

use mudlink_proto::{ClientFrame, Request};

use crate::{
    AppAction, AppEvent, CommandHistory, ConnectionState, InputLine, InventoryState, KeyInput,
    LineKind, MapState, Output, Panel, ReconnectPolicy, RetryDecision, RetryState, Settings,
    Theme, commands::Command,
};

/// Startup configuration for [`App`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// URL derived from host and port, used when nothing overrides it.
    pub default_url: String,
    /// URL given explicitly on the command line. Beats the persisted override.
    pub pinned_url: Option<String>,
    /// Reconnect behavior after a socket closes.
    pub reconnect: ReconnectPolicy,
    /// Output lines kept before the oldest is dropped.
    pub scrollback: usize,
    /// Settings loaded from storage.
    pub settings: Settings,
}

impl AppConfig {
    /// Configuration for `default_url` with default policy and settings.
    pub fn new(default_url: impl Into<String>) -> Self {
        Self {
            default_url: default_url.into(),
            pinned_url: None,
            reconnect: ReconnectPolicy::default(),
            scrollback: 1000,
            settings: Settings::default(),
        }
    }
}

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection state.
    state: ConnectionState,
    /// URL derived from host and port.
    default_url: String,
    /// Command-line URL. Cleared by `/server <url>`.
    pinned_url: Option<String>,
    /// Reconnect policy.
    policy: ReconnectPolicy,
    /// Attempts since the last successful open.
    retry: RetryState,
    /// Persisted preferences.
    settings: Settings,
    /// Scrollback buffer.
    pub(crate) output: Output,
    /// Submitted game commands.
    history: CommandHistory,
    /// Line being edited.
    input: InputLine,
    /// Side panel on display.
    panel: Panel,
    /// Output lines hidden below the view. Zero follows the newest line.
    scroll: usize,
    /// Map cache.
    pub(crate) map: MapState,
    /// Inventory cache.
    pub(crate) inventory: InventoryState,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App in disconnected state.
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            default_url: config.default_url,
            pinned_url: config.pinned_url,
            policy: config.reconnect,
            retry: RetryState::default(),
            settings: config.settings,
            output: Output::new(config.scrollback),
            history: CommandHistory::new(),
            input: InputLine::new(),
            panel: Panel::History,
            scroll: 0,
            map: MapState::default(),
            inventory: InventoryState::default(),
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Announce the client and open the first connection.
    pub fn start(&mut self) -> Vec<AppAction> {
        self.output.push("Client initialized.", LineKind::System);
        self.output.push(format!("Connecting to {}...", self.server_url()), LineKind::System);
        self.connect()
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::FocusGained => {
                if self.state != ConnectionState::Connected {
                    self.output.push("Reconnecting after focus returned...", LineKind::System);
                    self.connect()
                } else {
                    vec![]
                }
            },
            AppEvent::Opened => {
                tracing::info!(url = %self.server_url(), "connected");
                self.state = ConnectionState::Connected;
                self.retry.reset();
                self.output.push("Connected to server.", LineKind::System);
                vec![AppAction::Render]
            },
            AppEvent::Closed => self.handle_closed(),
            AppEvent::TransportError { message } => {
                tracing::warn!(%message, "transport error");
                self.state = ConnectionState::Disconnected;
                self.output.push(format!("Connection error: {message}"), LineKind::Error);
                vec![AppAction::Render]
            },
            AppEvent::FrameReceived(raw) => {
                let before = self.output.len();
                self.dispatch_frame(&raw);
                if self.scroll > 0 {
                    // Keep a scrolled-back view on the same lines.
                    let added = self.output.len().saturating_sub(before);
                    self.scroll = (self.scroll + added).min(self.max_scroll());
                }
                vec![AppAction::Render]
            },
            AppEvent::ReconnectDue => {
                if self.state == ConnectionState::Connected {
                    vec![]
                } else {
                    self.connect()
                }
            },
        }
    }

    fn handle_closed(&mut self) -> Vec<AppAction> {
        tracing::info!(attempts = self.retry.attempts(), "connection closed");
        self.state = ConnectionState::Disconnected;
        self.output.push("Disconnected from server.", LineKind::System);

        match self.retry.on_close(self.policy) {
            RetryDecision::Retry { delay } => {
                self.output.push(
                    format!(
                        "Connection lost. Attempting to reconnect in {} seconds...",
                        delay.as_secs_f64()
                    ),
                    LineKind::System,
                );
                vec![AppAction::ScheduleReconnect { delay }, AppAction::Render]
            },
            RetryDecision::GiveUp { first } => {
                if first {
                    self.output.push(
                        "Failed to reconnect after multiple attempts. Please restart the client to try again.",
                        LineKind::Error,
                    );
                }
                vec![AppAction::Render]
            },
        }
    }

    /// Handle keyboard input.
    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => self.input.insert(c),
            KeyInput::Backspace => self.input.backspace(),
            KeyInput::Delete => self.input.delete(),
            KeyInput::Left => self.input.left(),
            KeyInput::Right => self.input.right(),
            KeyInput::Home => self.input.home(),
            KeyInput::End => self.input.end(),
            KeyInput::Up => self.navigate(false),
            KeyInput::Down => self.navigate(true),
            KeyInput::PageUp => self.scroll_up(),
            KeyInput::PageDown => self.scroll_down(),
            KeyInput::Enter => return self.submit(),
            KeyInput::Tab => return self.show_panel(self.panel.next()),
            KeyInput::Esc | KeyInput::F(10) => return self.quit(),
            KeyInput::F(1) => return self.show_panel(Panel::History),
            KeyInput::F(2) => return self.toggle_panel(Panel::Inventory),
            KeyInput::F(3) => return self.show_panel(Panel::Map),
            KeyInput::F(4) => return self.toggle_panel(Panel::Help),
            KeyInput::F(6) => return self.toggle_dark_mode(),
            KeyInput::F(_) => return vec![],
        }
        vec![AppAction::Render]
    }

    /// Up/Down: history in the history and help panels, selection elsewhere.
    fn navigate(&mut self, forward: bool) {
        match self.panel {
            Panel::History | Panel::Help => {
                let entry = if forward { self.history.newer() } else { self.history.older() };
                if let Some(entry) = entry.map(str::to_owned) {
                    self.input.set(entry);
                }
            },
            Panel::Inventory => self.inventory.cycle(forward),
            Panel::Map => {
                if let Some(description) = self.map.cycle(forward) {
                    self.status_message = Some(description);
                }
            },
        }
    }

    /// Output lines one page scroll moves by.
    fn page_size(&self) -> usize {
        // Input box, status bar and the output borders.
        usize::from(self.terminal_size.1.saturating_sub(6)).max(1)
    }

    fn max_scroll(&self) -> usize {
        self.output.len().saturating_sub(1)
    }

    /// Scroll the output one page back.
    pub fn scroll_up(&mut self) {
        self.scroll = (self.scroll + self.page_size()).min(self.max_scroll());
    }

    /// Scroll the output one page forward, towards the newest line.
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(self.page_size());
    }

    /// Handle Enter key (send a game command or run a local command).
    fn submit(&mut self) -> Vec<AppAction> {
        self.scroll = 0;
        let line = self.input.take();
        let line = line.trim();
        if line.is_empty() {
            return vec![AppAction::Render];
        }

        match crate::commands::parse(line) {
            Command::Game { text } => {
                self.history.push(&text);
                self.send_command(text)
            },
            Command::Connect => self.manual_connect(),
            Command::Server { url: None } => {
                self.status_message = Some(format!("Server: {}", self.server_url()));
                vec![AppAction::Render]
            },
            Command::Server { url: Some(url) } => self.set_server(url),
            Command::ToggleDarkMode => self.toggle_dark_mode(),
            Command::Clear => self.clear(),
            Command::Map => self.show_panel(Panel::Map),
            Command::Inventory => self.toggle_panel(Panel::Inventory),
            Command::Help => self.toggle_panel(Panel::Help),
            Command::SelectRoom { room_id } => self.select_room(&room_id),
            Command::UseItem => self.act_on_item("use"),
            Command::DropItem => self.act_on_item("drop"),
            Command::Inspect => self.inspect_item(),
            Command::Quit => self.quit(),
            Command::Unknown { input } => {
                self.status_message = Some(format!("Unknown command: {input}"));
                vec![AppAction::Render]
            },
            Command::InvalidArgs { command, error } => {
                self.status_message = Some(format!("/{command}: {error}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Initiate connection to the effective server URL.
    pub fn connect(&mut self) -> Vec<AppAction> {
        self.state = ConnectionState::Connecting;
        vec![AppAction::Connect { url: self.server_url().to_owned() }, AppAction::Render]
    }

    /// Reconnect on request, starting a fresh retry session.
    pub fn manual_connect(&mut self) -> Vec<AppAction> {
        self.retry.reset();
        self.output.push(format!("Connecting to {}", self.server_url()), LineKind::System);
        self.connect()
    }

    /// Send a game command, or reconnect when there is no open socket.
    pub fn send_command(&mut self, command: String) -> Vec<AppAction> {
        self.output.push(format!("> {command}"), LineKind::CommandEcho);

        if self.state != ConnectionState::Connected {
            self.output.push("Not connected to server. Attempting to reconnect...", LineKind::Error);
            return self.connect();
        }

        tracing::debug!(%command, "sending command");
        vec![AppAction::Send(ClientFrame::command(command)), AppAction::Render]
    }

    /// Send a panel request if connected. Requests are dropped otherwise.
    fn request(&self, request: Request) -> Option<AppAction> {
        (self.state == ConnectionState::Connected).then(|| AppAction::Send(request.into()))
    }

    /// Switch to a panel, refreshing its data from the server.
    pub fn show_panel(&mut self, panel: Panel) -> Vec<AppAction> {
        self.panel = panel;
        let request = match panel {
            Panel::Map => self.request(Request::MapRequest),
            Panel::Inventory => self.request(Request::InventoryRequest),
            Panel::History | Panel::Help => None,
        };
        request.into_iter().chain([AppAction::Render]).collect()
    }

    /// Show a panel, or go back to history if it is already showing.
    pub fn toggle_panel(&mut self, panel: Panel) -> Vec<AppAction> {
        if self.panel == panel {
            self.panel = Panel::History;
            vec![AppAction::Render]
        } else {
            self.show_panel(panel)
        }
    }

    /// Flip dark mode and persist the choice.
    pub fn toggle_dark_mode(&mut self) -> Vec<AppAction> {
        self.settings.dark_mode = !self.settings.dark_mode;
        vec![AppAction::SaveSettings(self.settings.clone()), AppAction::Render]
    }

    /// Override the server URL, persist it and reconnect.
    pub fn set_server(&mut self, url: String) -> Vec<AppAction> {
        self.settings.server_url = Some(url);
        self.pinned_url = None;
        let mut actions = vec![AppAction::SaveSettings(self.settings.clone())];
        actions.extend(self.manual_connect());
        actions
    }

    /// Clear the output buffer.
    pub fn clear(&mut self) -> Vec<AppAction> {
        self.output.clear();
        self.scroll = 0;
        self.output.push("Terminal cleared.", LineKind::System);
        vec![AppAction::Render]
    }

    /// Select a map room and describe it.
    pub fn select_room(&mut self, room_id: &str) -> Vec<AppAction> {
        self.status_message = Some(
            self.map
                .select(room_id)
                .unwrap_or_else(|| format!("Unknown room: {room_id}")),
        );
        vec![AppAction::Render]
    }

    /// Send `<verb> <name>` for the selected item.
    fn act_on_item(&mut self, verb: &str) -> Vec<AppAction> {
        match self.inventory.selected_item().map(|item| item.name().to_owned()) {
            Some(name) => self.send_command(format!("{verb} {name}")),
            None => {
                self.status_message = Some("No item selected.".into());
                vec![AppAction::Render]
            },
        }
    }

    /// Ask the server for the selected item's details.
    fn inspect_item(&mut self) -> Vec<AppAction> {
        let Some(object_id) = self.inventory.selected_id().map(str::to_owned) else {
            self.status_message = Some("No item selected.".into());
            return vec![AppAction::Render];
        };
        match self.request(Request::ObjectRequest { object_id }) {
            Some(send) => vec![send, AppAction::Render],
            None => {
                self.status_message = Some("Not connected to server.".into());
                vec![AppAction::Render]
            },
        }
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// URL the next connection goes to.
    pub fn server_url(&self) -> &str {
        self.pinned_url
            .as_deref()
            .or(self.settings.server_url.as_deref())
            .unwrap_or(&self.default_url)
    }

    /// Persisted preferences.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Active palette.
    pub fn theme(&self) -> Theme {
        self.settings.theme()
    }

    /// Scrollback buffer.
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Submitted game commands.
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Line being edited.
    pub fn input(&self) -> &InputLine {
        &self.input
    }

    /// Side panel on display.
    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// Output lines hidden below the view.
    pub fn output_scroll(&self) -> usize {
        self.scroll
    }

    /// Map cache.
    pub fn map(&self) -> &MapState {
        &self.map
    }

    /// Inventory cache.
    pub fn inventory(&self) -> &InventoryState {
        &self.inventory
    }

    /// Reconnect attempts since the last successful open.
    pub fn retry(&self) -> RetryState {
        self.retry
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
