//! Terminal UI for mudlink
//!
//! A thin shell over [`mudlink_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`mudlink_app::Runtime`]
//!
//! This crate handles terminal rendering, the WebSocket transport, settings
//! storage and command-line configuration.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod settings_store;
pub mod terminal;
pub mod transport;
pub mod ui;

pub use config::Args;
pub use mudlink_app::{App, AppAction, AppConfig, AppEvent, Driver, KeyInput, Runtime};
pub use settings_store::{SettingsError, SettingsStore};
pub use terminal::{TerminalDriver, TerminalError};
pub use transport::TransportError;
