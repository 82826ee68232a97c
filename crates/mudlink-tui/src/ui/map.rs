//! Map panel
//!
//! Draws the room grid, three columns per cell, with lock, hazard and power
//! indicators, followed by the selected room's description.

use mudlink_app::{App, MapCell, Panel};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{Palette, panel_block};

const EMPTY_CELL: &str = " · ";
const CELL_WIDTH: u16 = 3;
const LEGEND: &str = "# locked  ! hazard  ~ no power";

/// Render the map panel.
pub fn render(frame: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let map = app.map();
    let muted = Style::default().fg(palette.muted);
    let block = panel_block(Panel::Map.title(), palette);
    let inner = block.inner(area);
    let description = map.selected().and_then(|id| map.describe(id));

    // Legend and description take a blank separator row each.
    let reserved = if description.is_some() { 4 } else { 2 };
    let cols = usize::from(inner.width / CELL_WIDTH);
    let rows = usize::from(inner.height.saturating_sub(reserved));

    let mut lines: Vec<Line> = if map.is_empty() {
        vec![Line::from(Span::styled("No map data. Use /map", muted))]
    } else {
        map.grid_window(cols, rows)
            .iter()
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|cell| match cell {
                            Some(cell) => cell_span(cell, palette),
                            None => Span::styled(EMPTY_CELL, muted),
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    };

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(LEGEND, muted)));

    if let Some(description) = description {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(description, Style::default().fg(palette.system))));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}

/// Indicator marker, by priority: lock, hazard, power.
fn marker(cell: &MapCell) -> char {
    if cell.locked {
        '#'
    } else if cell.hazard {
        '!'
    } else if cell.unpowered {
        '~'
    } else {
        ' '
    }
}

fn cell_span(cell: &MapCell, palette: Palette) -> Span<'static> {
    let color = if cell.hazard {
        Color::Red
    } else if cell.locked {
        Color::Yellow
    } else if cell.unpowered {
        palette.muted
    } else {
        palette.location
    };

    let mut style = Style::default().fg(color);
    if cell.selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!("[{}{}", cell.initial, marker(cell)), style)
}

#[cfg(test)]
mod tests {
    use mudlink_app::{AppEvent, KeyInput};

    use super::super::tests::{app, draw, screen_text};

    #[test]
    fn grid_shows_rooms_and_lock_marker() {
        let mut app = app();
        let _ = app.handle(AppEvent::FrameReceived(
            r#"{"type":"map","rooms":[{"id":"r1","x":0,"y":0,"name":"Bridge"},{"id":"r2","x":2,"y":0,"name":"Cargo"}]}"#.into(),
        ));
        let _ = app.handle(AppEvent::FrameReceived(r#"{"type":"door_status","door_id":"r1","locked":true}"#.into()));
        let _ = app.handle(AppEvent::Key(KeyInput::F(3)));

        let text = screen_text(&draw(&app, 100, 24));
        assert!(text.contains("[B# · [C "));
    }

    #[test]
    fn distant_rooms_draw_a_clipped_window() {
        let mut app = app();
        let _ = app.handle(AppEvent::FrameReceived(
            r#"{"type":"map","rooms":[{"id":"r1","x":0,"y":0,"name":"Bridge"},{"id":"r2","x":3000,"y":3000,"name":"Cargo"}]}"#.into(),
        ));
        let _ = app.handle(AppEvent::Key(KeyInput::F(3)));

        let _ = app.handle(AppEvent::Key(KeyInput::Down));
        let text = screen_text(&draw(&app, 100, 24));
        assert!(text.contains("[B "));
        assert!(!text.contains("[C "));

        let _ = app.handle(AppEvent::Key(KeyInput::Down));
        let text = screen_text(&draw(&app, 100, 24));
        assert!(text.contains("[C "));
        assert!(!text.contains("[B "));
    }

    #[test]
    fn empty_map_hint() {
        let mut app = app();
        let _ = app.handle(AppEvent::Key(KeyInput::F(3)));
        assert!(screen_text(&draw(&app, 100, 24)).contains("No map data"));
    }
}
