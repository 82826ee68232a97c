//! Behavior tests for the App state machine.
//!
//! Each test drives the App only through [`AppEvent`]s, the same way the
//! terminal driver does, and ends with oracle checks on the visible state:
//! - Output lines and their kinds
//! - Emitted actions
//! - Panel caches

use std::time::Duration;

use mudlink_app::{
    App, AppAction, AppConfig, AppEvent, ConnectionState, KeyInput, LineKind, Panel,
    ReconnectPolicy, Settings, Theme,
};
use mudlink_proto::{ClientFrame, Request};

const URL: &str = "ws://localhost:5000/ws";

fn new_app() -> App {
    App::new(AppConfig::new(URL))
}

/// Create an App whose socket is open.
fn connected_app() -> App {
    let mut app = new_app();
    let _ = app.start();
    let _ = app.handle(AppEvent::Opened);
    app
}

/// Type a line and press Enter.
fn submit(app: &mut App, line: &str) -> Vec<AppAction> {
    for c in line.chars() {
        let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
    }
    app.handle(AppEvent::Key(KeyInput::Enter))
}

fn frame(app: &mut App, raw: &str) -> Vec<AppAction> {
    app.handle(AppEvent::FrameReceived(raw.to_owned()))
}

fn lines(app: &App) -> Vec<String> {
    app.output().lines().map(|l| l.text.clone()).collect()
}

fn count(actions: &[AppAction], pred: impl Fn(&AppAction) -> bool) -> usize {
    actions.iter().filter(|a| pred(a)).count()
}

#[test]
fn non_json_frame_is_shown_verbatim() {
    let mut app = connected_app();
    let _ = frame(&mut app, "The airlock hisses. {not json");

    let last = app.output().last().expect("line appended");
    assert_eq!(last.text, "The airlock hisses. {not json");
    assert_eq!(last.kind, LineKind::Plain);
}

#[test]
fn unknown_type_shows_message_or_fallback() {
    let mut app = connected_app();
    let _ = frame(&mut app, r#"{"type":"weather","message":"It rains."}"#);
    let _ = frame(&mut app, r#"{"type":"weather"}"#);

    let lines = lines(&app);
    assert_eq!(&lines[lines.len() - 2..], ["It rains.", "Unknown message type: weather"]);
}

#[test]
fn send_while_disconnected_reconnects_instead() {
    let mut app = new_app();
    let actions = submit(&mut app, "look");

    assert_eq!(count(&actions, |a| matches!(a, AppAction::Send(_))), 0);
    assert_eq!(count(&actions, |a| matches!(a, AppAction::Connect { .. })), 1);
    assert_eq!(app.connection_state(), ConnectionState::Connecting);
    assert_eq!(lines(&app), ["> look", "Not connected to server. Attempting to reconnect..."]);
}

#[test]
fn repeated_commands_coalesce_in_history() {
    let mut app = connected_app();
    for cmd in ["look", "look", "look"] {
        let _ = submit(&mut app, cmd);
    }
    assert_eq!(app.history().len(), 1);

    let mut app = connected_app();
    for cmd in ["look", "north", "look"] {
        let _ = submit(&mut app, cmd);
    }
    assert_eq!(app.history().recent().collect::<Vec<_>>(), ["look", "north", "look"]);
}

#[test]
fn history_navigation_fills_input() {
    let mut app = connected_app();
    let _ = submit(&mut app, "look");
    let _ = submit(&mut app, "north");

    let _ = app.handle(AppEvent::Key(KeyInput::Up));
    assert_eq!(app.input().buffer(), "north");
    let _ = app.handle(AppEvent::Key(KeyInput::Up));
    let _ = app.handle(AppEvent::Key(KeyInput::Up));
    assert_eq!(app.input().buffer(), "look");

    let _ = app.handle(AppEvent::Key(KeyInput::Down));
    assert_eq!(app.input().buffer(), "north");
    let _ = app.handle(AppEvent::Key(KeyInput::Down));
    assert_eq!(app.input().buffer(), "");
}

#[test]
fn linear_policy_gives_up_exactly_once() {
    let mut app = new_app();
    let _ = app.start();

    let mut delays = Vec::new();
    for _ in 0..8 {
        for action in app.handle(AppEvent::Closed) {
            if let AppAction::ScheduleReconnect { delay } = action {
                delays.push(delay);
            }
        }
    }

    let expected: Vec<Duration> = (1..=5).map(|n| Duration::from_secs(3 * n)).collect();
    assert_eq!(delays, expected);

    let give_ups = lines(&app)
        .iter()
        .filter(|l| l.starts_with("Failed to reconnect after multiple attempts"))
        .count();
    assert_eq!(give_ups, 1);
    assert!(lines(&app).contains(&"Connection lost. Attempting to reconnect in 3 seconds...".to_owned()));
}

#[test]
fn open_resets_the_retry_session() {
    let mut app = new_app();
    for _ in 0..3 {
        let _ = app.handle(AppEvent::Closed);
    }
    let _ = app.handle(AppEvent::Opened);
    assert_eq!(app.retry().attempts(), 0);

    let actions = app.handle(AppEvent::Closed);
    assert!(actions.contains(&AppAction::ScheduleReconnect { delay: Duration::from_secs(3) }));
}

#[test]
fn manual_connect_after_give_up_starts_over() {
    let mut config = AppConfig::new(URL);
    config.reconnect = ReconnectPolicy::Linear { step: Duration::from_secs(1), max_attempts: 1 };
    let mut app = App::new(config);

    let _ = app.handle(AppEvent::Closed);
    let _ = app.handle(AppEvent::Closed);
    assert!(app.retry().has_given_up());

    let actions = submit(&mut app, "/connect");
    assert!(actions.contains(&AppAction::Connect { url: URL.into() }));
    assert!(!app.retry().has_given_up());
}

#[test]
fn transport_error_does_not_schedule_by_itself() {
    let mut app = connected_app();
    let actions = app.handle(AppEvent::TransportError { message: "reset by peer".into() });

    assert_eq!(actions, [AppAction::Render]);
    assert_eq!(app.connection_state(), ConnectionState::Disconnected);
    assert_eq!(app.output().last().map(|l| l.text.as_str()), Some("Connection error: reset by peer"));
}

#[test]
fn reconnect_due_while_connected_is_ignored() {
    let mut app = connected_app();
    assert!(app.handle(AppEvent::ReconnectDue).is_empty());

    let _ = app.handle(AppEvent::Closed);
    let actions = app.handle(AppEvent::ReconnectDue);
    assert!(actions.contains(&AppAction::Connect { url: URL.into() }));
}

#[test]
fn door_status_toggles_lock_in_grid() {
    let mut app = connected_app();
    let _ = frame(
        &mut app,
        r#"{"type":"map","rooms":[{"id":"r1","x":0,"y":0,"name":"Bridge"},{"id":"r2","x":1,"y":0,"name":"Hall"}]}"#,
    );

    let _ = frame(&mut app, r#"{"type":"door_status","door_id":"r1","locked":true}"#);
    let grid = app.map().grid_window(10, 10);
    let cell = grid[0][0].as_ref().expect("r1 cell");
    assert_eq!(cell.room_id, "r1");
    assert!(cell.locked);

    let _ = frame(&mut app, r#"{"type":"door_status","door_id":"r1","locked":false}"#);
    let grid = app.map().grid_window(10, 10);
    assert!(!grid[0][0].as_ref().expect("r1 cell").locked);
}

#[test]
fn map_snapshot_replaces_point_updates() {
    let mut app = connected_app();
    let _ = frame(&mut app, r#"{"type":"map","rooms":[{"id":"r1","x":0,"y":0,"name":"Bridge"}]}"#);
    let _ = frame(&mut app, r#"{"type":"door_status","door_id":"r1","locked":true}"#);
    let _ = frame(
        &mut app,
        r#"{"type":"map","rooms":[{"id":"r1","x":0,"y":0,"name":"Bridge"}],"doors":{"r1":false}}"#,
    );

    assert!(!app.map().is_locked("r1"));
}

#[test]
fn inventory_selection_drives_item_commands() {
    let mut app = connected_app();
    let _ = frame(
        &mut app,
        r#"{"type":"inventory","inventory":{"items":[{"id":"i1","name":"Wrench","description":"Heavy."}],"equipment":[]}}"#,
    );

    let _ = submit(&mut app, "/inv");
    assert_eq!(app.panel(), Panel::Inventory);
    let _ = app.handle(AppEvent::Key(KeyInput::Down));
    assert_eq!(app.inventory().details(), Some("Heavy."));

    let actions = submit(&mut app, "/use");
    assert!(actions.contains(&AppAction::Send(ClientFrame::command("use Wrench"))));

    let actions = submit(&mut app, "/inspect");
    assert!(actions.contains(&AppAction::Send(Request::ObjectRequest { object_id: "i1".into() }.into())));
}

#[test]
fn inventory_toggle_requests_when_opening() {
    let mut app = connected_app();
    let actions = app.handle(AppEvent::Key(KeyInput::F(2)));
    assert!(actions.contains(&AppAction::Send(Request::InventoryRequest.into())));

    let actions = app.handle(AppEvent::Key(KeyInput::F(2)));
    assert_eq!(actions, [AppAction::Render]);
    assert_eq!(app.panel(), Panel::History);
}

#[test]
fn room_command_describes_room() {
    let mut app = connected_app();
    let _ = frame(
        &mut app,
        r#"{"type":"map","rooms":[{"id":"r1","x":0,"y":0,"name":"Bridge"}],"hazards":{"r1":["smoke"]},"power":{"r1":false}}"#,
    );

    let _ = submit(&mut app, "/room r1");
    assert_eq!(app.status_message(), Some("Bridge - Hazards: smoke [No Power]"));
    assert_eq!(app.map().selected(), Some("r1"));

    let _ = submit(&mut app, "/room nowhere");
    assert_eq!(app.status_message(), Some("Unknown room: nowhere"));
}

#[test]
fn dark_mode_toggle_persists_and_relabels() {
    let mut app = connected_app();
    assert_eq!(app.theme(), Theme::Dark);
    assert_eq!(app.theme().toggle_label(), "Light Mode");

    let actions = app.handle(AppEvent::Key(KeyInput::F(6)));
    assert!(actions.contains(&AppAction::SaveSettings(Settings { dark_mode: false, server_url: None })));
    assert_eq!(app.theme(), Theme::Light);
    assert_eq!(app.theme().toggle_label(), "Dark Mode");
}

#[test]
fn clear_leaves_a_single_notice() {
    let mut app = connected_app();
    let _ = frame(&mut app, "one");
    let _ = frame(&mut app, "two");
    let _ = submit(&mut app, "/clear");

    assert_eq!(lines(&app), ["Terminal cleared."]);
}

#[test]
fn quit_keys() {
    let mut app = connected_app();
    assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), [AppAction::Quit]);
    assert_eq!(app.handle(AppEvent::Key(KeyInput::F(10))), [AppAction::Quit]);
    assert_eq!(submit(&mut app, "/q"), [AppAction::Quit]);
}
