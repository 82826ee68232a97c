//! Help panel

use mudlink_app::Panel;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{Palette, panel_block};

const BINDINGS: &[(&str, &str)] = &[
    ("Enter", "send command"),
    ("Up/Down", "history or selection"),
    ("PgUp/PgDn", "scroll output"),
    ("Tab", "next panel"),
    ("F1", "history"),
    ("F2", "inventory"),
    ("F3", "map"),
    ("F4", "help"),
    ("F6", "dark/light mode"),
    ("F10/Esc", "quit"),
    ("/connect", "reconnect"),
    ("/server [url]", "show or set server"),
    ("/map /inv", "refresh panels"),
    ("/room <id>", "describe room"),
    ("/use /drop", "selected item"),
    ("/inspect", "item details"),
    ("/dark /clear", "theme, clear"),
    ("/quit", "quit"),
];

/// Render the help panel.
pub fn render(frame: &mut Frame, palette: Palette, area: Rect) {
    let key_style = Style::default().fg(palette.accent);
    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, what)| {
            Line::from(vec![Span::styled(format!("{key:<14}"), key_style), Span::raw(*what)])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel_block(Panel::Help.title(), palette));
    frame.render_widget(paragraph, area);
}
