//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: client state machine
//! - [`Driver`]: Platform-specific I/O
//!
//! One event is handled at a time and all of its actions run before the next
//! event is polled.

use crate::{App, AppAction, AppEvent, Driver};

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: App,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a new runtime with the given driver and app.
    pub fn new(driver: D, app: App) -> Self {
        Self { driver, app }
    }

    /// Run the main event loop.
    ///
    /// 1. Starts the app, which opens the first connection
    /// 2. Polls for input events from the driver
    /// 3. Feeds each event to the App and executes the returned actions
    ///
    /// # Errors
    ///
    /// Returns an error if polling or rendering fails. Send and settings
    /// failures are reported to the player instead.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;
        let actions = self.app.start();
        if !self.process_actions(actions)? {
            loop {
                let Some(event) = self.driver.poll_event().await? else {
                    continue;
                };
                if self.handle_event(event)? {
                    break;
                }
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Feed one event to the App.
    ///
    /// Returns `true` if the application should quit.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn handle_event(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        let actions = self.app.handle(event);
        self.process_actions(actions)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut needs_render = false;

        for action in actions {
            match action {
                AppAction::Render => needs_render = true,
                AppAction::Quit => return Ok(true),
                AppAction::Connect { url } => {
                    tracing::info!(%url, "connecting");
                    self.driver.open(&url);
                },
                AppAction::Send(frame) => {
                    if let Err(e) = self.driver.send_text(frame.to_wire()) {
                        tracing::warn!(error = %e, "send failed");
                        self.app.set_status(format!("Send failed: {e}"));
                        needs_render = true;
                    }
                },
                AppAction::ScheduleReconnect { delay } => self.driver.schedule_reconnect(delay),
                AppAction::SaveSettings(settings) => {
                    if let Err(e) = self.driver.save_settings(&settings) {
                        tracing::warn!(error = %e, "failed to save settings");
                        self.app.set_status(format!("Failed to save settings: {e}"));
                        needs_render = true;
                    }
                },
            }
        }

        if needs_render {
            self.driver.render(&self.app)?;
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
