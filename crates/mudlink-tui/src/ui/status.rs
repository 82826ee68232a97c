//! Status bar
//!
//! Displays connection status, the server URL, the last status message and
//! the theme toggle.

use mudlink_app::{App, ConnectionState};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Palette;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let state = app.connection_state();
    let connection_status = match state {
        ConnectionState::Disconnected => Span::styled(state.label(), Style::default().fg(Color::Red)),
        ConnectionState::Connecting => Span::styled(state.label(), Style::default().fg(Color::Yellow)),
        ConnectionState::Connected => Span::styled(
            state.label(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let mut spans = vec![
        Span::raw(" "),
        connection_status,
        Span::raw(format!(" | {}", app.server_url())),
    ];
    if let Some(message) = app.status_message() {
        spans.push(Span::raw(format!(" | {message}")));
    }
    spans.push(Span::raw(format!(" | F6 {}", app.theme().toggle_label())));

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(palette.status_bg).fg(palette.foreground));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use mudlink_app::AppEvent;

    use super::super::tests::{app, draw, screen_text};

    #[test]
    fn shows_state_url_and_toggle() {
        let mut app = app();
        let _ = app.handle(AppEvent::Opened);
        let text = screen_text(&draw(&app, 100, 24));
        let status = text.lines().last().unwrap_or_default();

        assert!(status.contains("Connected | ws://localhost:5000/ws"));
        assert!(status.contains("F6 Light Mode"));
    }
}
