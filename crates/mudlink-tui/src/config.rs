//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use mudlink_app::{AppConfig, ReconnectPolicy, Settings};

/// Reconnect policy names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReconnectMode {
    /// Same delay every time, never giving up.
    Fixed,
    /// Growing delay, giving up after a number of attempts.
    Linear,
}

/// Terminal client for WebSocket MUD servers
#[derive(Parser, Debug, Clone)]
#[command(name = "mudlink")]
#[command(about = "Terminal client for WebSocket MUD servers")]
#[command(version)]
pub struct Args {
    /// Server host
    #[arg(long, env = "MUDLINK_HOST", default_value = "localhost")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "MUDLINK_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Use wss:// instead of ws://
    #[arg(long, env = "MUDLINK_TLS")]
    pub tls: bool,

    /// Full socket URL. Overrides host, port and the saved server.
    #[arg(short, long, env = "MUDLINK_SERVER_URL")]
    pub server_url: Option<String>,

    /// Reconnect policy after the connection drops
    #[arg(long, env = "MUDLINK_RECONNECT", value_enum, default_value_t = ReconnectMode::Linear)]
    pub reconnect: ReconnectMode,

    /// Reconnect delay in milliseconds (per attempt for the linear policy)
    #[arg(long, env = "MUDLINK_RECONNECT_DELAY_MS", default_value_t = 3000)]
    pub reconnect_delay_ms: u64,

    /// Attempts before the linear policy gives up
    #[arg(long, env = "MUDLINK_MAX_RECONNECT_ATTEMPTS", default_value_t = 5)]
    pub max_reconnect_attempts: u32,

    /// Output lines kept in scrollback
    #[arg(long, env = "MUDLINK_SCROLLBACK", default_value_t = 1000)]
    pub scrollback: usize,

    /// Settings file. Defaults to the platform config directory.
    #[arg(long, env = "MUDLINK_SETTINGS_FILE")]
    pub settings_file: Option<PathBuf>,

    /// Log file. Logging is off when unset.
    #[arg(long, env = "MUDLINK_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `mudlink_app=debug`
    #[arg(long, env = "MUDLINK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// URL derived from host, port and TLS.
    pub fn default_url(&self) -> String {
        let scheme = if self.tls { "wss" } else { "ws" };
        format!("{scheme}://{}:{}/ws", self.host, self.port)
    }

    /// Reconnect policy from the flags.
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        let delay = Duration::from_millis(self.reconnect_delay_ms);
        match self.reconnect {
            ReconnectMode::Fixed => ReconnectPolicy::Fixed { delay },
            ReconnectMode::Linear => {
                ReconnectPolicy::Linear { step: delay, max_attempts: self.max_reconnect_attempts }
            },
        }
    }

    /// App configuration with the given persisted settings.
    pub fn app_config(&self, settings: Settings) -> AppConfig {
        AppConfig {
            default_url: self.default_url(),
            pinned_url: self.server_url.clone(),
            reconnect: self.reconnect_policy(),
            scrollback: self.scrollback,
            settings,
        }
    }
}
