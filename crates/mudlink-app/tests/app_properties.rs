//! Property-based tests for App state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences.
//! This ensures behavioral correctness across all possible execution paths.

use std::time::Duration;

use mudlink_app::{
    App, AppAction, AppConfig, AppEvent, ConnectionState, KeyInput, ReconnectPolicy,
};
use proptest::prelude::*;

const SCROLLBACK: usize = 64;
const MAX_ATTEMPTS: u32 = 5;

/// Generate random app events.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        1 => Just(AppEvent::Tick),
        1 => (1u16..200, 1u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
        2 => Just(AppEvent::Opened),
        3 => Just(AppEvent::Closed),
        1 => "[a-z ]{0,12}".prop_map(|message| AppEvent::TransportError { message }),
        1 => Just(AppEvent::FocusGained),
        2 => Just(AppEvent::ReconnectDue),
        3 => "\\PC{0,40}".prop_map(AppEvent::FrameReceived),
        3 => prop::char::range('a', 'z').prop_map(|c| AppEvent::Key(KeyInput::Char(c))),
        2 => Just(AppEvent::Key(KeyInput::Enter)),
        1 => Just(AppEvent::Key(KeyInput::Up)),
        1 => Just(AppEvent::Key(KeyInput::Down)),
        1 => Just(AppEvent::Key(KeyInput::Tab)),
        1 => Just(AppEvent::Key(KeyInput::Backspace)),
        1 => Just(AppEvent::Key(KeyInput::PageUp)),
        1 => Just(AppEvent::Key(KeyInput::PageDown)),
    ]
}

fn new_app() -> App {
    let mut config = AppConfig::new("ws://localhost:5000/ws");
    config.scrollback = SCROLLBACK;
    config.reconnect =
        ReconnectPolicy::Linear { step: Duration::from_millis(10), max_attempts: MAX_ATTEMPTS };
    App::new(config)
}

proptest! {
    #[test]
    fn prop_app_invariants_hold(events in prop::collection::vec(event_strategy(), 0..80)) {
        let mut app = new_app();
        let _ = app.start();

        let mut scheduled_since_open = 0u32;
        for event in events {
            let opened = event == AppEvent::Opened;
            let actions = app.handle(event);
            if opened {
                scheduled_since_open = 0;
            }

            let connects = actions.iter().filter(|a| matches!(a, AppAction::Connect { .. })).count();
            prop_assert!(connects <= 1, "at most one connect per event");

            let sends = actions.iter().any(|a| matches!(a, AppAction::Send(_)));
            if sends {
                prop_assert_eq!(app.connection_state(), ConnectionState::Connected);
            }

            scheduled_since_open += u32::try_from(
                actions.iter().filter(|a| matches!(a, AppAction::ScheduleReconnect { .. })).count(),
            ).unwrap_or(u32::MAX);
            prop_assert!(scheduled_since_open <= MAX_ATTEMPTS);

            prop_assert!(app.output().len() <= SCROLLBACK);
            prop_assert!(app.output_scroll() <= app.output().len().saturating_sub(1));
            prop_assert!(app.input().cursor() <= app.input().buffer().chars().count());
        }
    }

    #[test]
    fn prop_history_never_has_adjacent_duplicates(
        commands in prop::collection::vec("[ab]{1,2}", 0..30),
    ) {
        let mut app = new_app();
        let _ = app.handle(AppEvent::Opened);
        for cmd in &commands {
            for c in cmd.chars() {
                let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
            }
            let _ = app.handle(AppEvent::Key(KeyInput::Enter));
        }

        let recent: Vec<&str> = app.history().recent().collect();
        prop_assert!(recent.windows(2).all(|w| w[0] != w[1]));
        prop_assert!(recent.len() <= mudlink_app::HISTORY_DISPLAY_LIMIT);
    }

    #[test]
    fn prop_any_frame_is_accepted(raw in "\\PC{0,80}") {
        let mut app = new_app();
        let actions = app.handle(AppEvent::FrameReceived(raw));
        prop_assert_eq!(actions, vec![AppAction::Render]);
    }
}
