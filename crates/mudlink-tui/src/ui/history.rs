//! History panel
//!
//! Lists the most recent commands, newest first.

use mudlink_app::{App, Panel};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use super::{Palette, panel_block};

/// Render the history panel.
pub fn render(frame: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let items: Vec<ListItem> = if app.history().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No commands yet",
            Style::default().fg(palette.muted),
        )))]
    } else {
        app.history()
            .recent()
            .map(|cmd| ListItem::new(Line::from(Span::raw(cmd.to_owned()))))
            .collect()
    };

    let list = List::new(items).block(panel_block(Panel::History.title(), palette));
    frame.render_widget(list, area);
}
