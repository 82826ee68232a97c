//! Application layer for mudlink
//!
//! Pure state machine and generic runtime for a MUD client, enabling
//! deterministic simulation testing with the same code that runs in the
//! terminal.
//!
//! # Components
//!
//! - [`App`]: client state machine (connection manager, dispatcher, commands)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
pub mod ansi;
mod app;
pub mod commands;
mod dispatch;
mod driver;
mod event;
mod history;
mod input;
mod inventory;
mod map;
mod reconnect;
mod runtime;
mod settings;
mod state;

pub use action::AppAction;
pub use app::{App, AppConfig};
pub use driver::Driver;
pub use event::AppEvent;
pub use history::{CommandHistory, HISTORY_DISPLAY_LIMIT};
pub use input::{InputLine, KeyInput};
pub use inventory::InventoryState;
pub use map::{MapCell, MapGrid, MapState, RoomPosition};
pub use reconnect::{ReconnectPolicy, RetryDecision, RetryState};
pub use runtime::Runtime;
pub use settings::Settings;
pub use state::{ConnectionState, LineKind, Output, OutputLine, Panel, Theme};
