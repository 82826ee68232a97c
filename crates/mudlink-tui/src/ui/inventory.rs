//! Inventory panel
//!
//! Carried items, equipped items by slot, and the selected item's details.

use mudlink_app::{App, Panel};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{Palette, panel_block};

const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";

/// Render the inventory panel.
pub fn render(frame: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let inventory = app.inventory();
    let muted = Style::default().fg(palette.muted);
    let heading = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);

    let entry = |id: &str, label: String| {
        let selected = inventory.selected_id() == Some(id);
        let (prefix, style) = if selected {
            (SELECTED_PREFIX, Style::default().fg(palette.accent).add_modifier(Modifier::REVERSED))
        } else {
            (UNSELECTED_PREFIX, Style::default().fg(palette.foreground))
        };
        Line::from(vec![Span::raw(prefix), Span::styled(label, style)])
    };

    let mut lines = Vec::new();
    match inventory.data() {
        None => lines.push(Line::from(Span::styled("Inventory not loaded", muted))),
        Some(data) => {
            lines.push(Line::from(Span::styled("Items", heading)));
            if data.items.is_empty() {
                lines.push(Line::from(Span::styled("  (none)", muted)));
            }
            for item in &data.items {
                lines.push(entry(&item.id, item.name.clone()));
            }

            lines.push(Line::from(Span::styled("Equipment", heading)));
            if data.equipment.is_empty() {
                lines.push(Line::from(Span::styled("  (none)", muted)));
            }
            for eq in &data.equipment {
                lines.push(entry(&eq.id, format!("{}: {}", eq.slot, eq.name)));
            }
        },
    }

    if let Some(details) = inventory.details() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(details.to_owned(), Style::default().fg(palette.system))));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel_block(Panel::Inventory.title(), palette));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use mudlink_app::{AppEvent, KeyInput};

    use super::super::tests::{app, draw, screen_text};

    #[test]
    fn lists_items_and_marks_selection() {
        let mut app = app();
        let _ = app.handle(AppEvent::FrameReceived(
            r#"{"type":"inventory","inventory":{"items":[{"id":"1","name":"Crowbar","description":"Bent."}],"equipment":[{"slot":"head","id":"2","name":"Helmet"}]}}"#.into(),
        ));
        let _ = app.handle(AppEvent::Key(KeyInput::F(2)));
        let _ = app.handle(AppEvent::Key(KeyInput::Down));

        let text = screen_text(&draw(&app, 100, 24));
        assert!(text.contains("> Crowbar"));
        assert!(text.contains("head: Helmet"));
        assert!(text.contains("Bent."));
    }
}
