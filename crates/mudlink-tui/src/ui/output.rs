//! Output area
//!
//! Displays the scrollback, newest line at the bottom, with ANSI colours.
//! Frame text is split on newlines and wrapped to the pane width. Only the
//! lines that can reach the screen are wrapped.

use std::collections::VecDeque;

use mudlink_app::{
    App, LineKind, OutputLine,
    ansi::{self, AnsiColor},
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthChar;

use super::{Palette, panel_block};

/// Render the output area.
pub fn render(frame: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let output = app.output();
    let scroll = app.output_scroll();
    let title = if scroll > 0 { format!("Output (+{scroll})") } else { "Output".to_owned() };
    let block = panel_block(&title, palette);

    let inner = block.inner(area);
    let width = usize::from(inner.width);
    let height = usize::from(inner.height);
    let end = output.len().saturating_sub(scroll);

    let mut rows: VecDeque<Line> = VecDeque::with_capacity(height);
    for line in output.lines().take(end).rev() {
        if rows.len() >= height {
            break;
        }
        for logical in styled_lines(line, palette).into_iter().rev() {
            for row in wrap(logical, width).into_iter().rev() {
                rows.push_front(row);
            }
        }
    }
    while rows.len() > height {
        rows.pop_front();
    }

    frame.render_widget(Paragraph::new(Vec::from(rows)).block(block), area);
}

/// Convert one output line into coloured lines, one per `\n`.
pub fn styled_lines(line: &OutputLine, palette: Palette) -> Vec<Line<'_>> {
    let base = kind_style(line.kind, palette);
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for segment in ansi::parse(&line.text) {
        let style = match segment.color {
            Some(color) => base.fg(ansi_color(color)),
            None => base,
        };
        let mut pieces = segment.text.split('\n');
        if let Some(first) = pieces.next() {
            push_piece(&mut current, first, style);
        }
        for piece in pieces {
            lines.push(Line::from(std::mem::take(&mut current)));
            push_piece(&mut current, piece, style);
        }
    }
    // A trailing newline does not add a blank row.
    if !current.is_empty() || lines.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

fn push_piece<'a>(spans: &mut Vec<Span<'a>>, piece: &'a str, style: Style) {
    let piece = piece.trim_end_matches('\r');
    if !piece.is_empty() {
        spans.push(Span::styled(piece, style));
    }
}

/// Break a line into rows at most `width` columns wide.
fn wrap(line: Line<'_>, width: usize) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in line.spans {
        let mut piece = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if used > 0 && used + w > width {
                if !piece.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut piece), span.style));
                }
                rows.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            piece.push(c);
            used += w;
        }
        if !piece.is_empty() {
            current.push(Span::styled(piece, span.style));
        }
    }
    rows.push(Line::from(current));
    rows
}

fn kind_style(kind: LineKind, palette: Palette) -> Style {
    let style = Style::default().bg(palette.background);
    match kind {
        LineKind::Plain => style.fg(palette.foreground),
        LineKind::Error => style.fg(palette.error),
        LineKind::System => style.fg(palette.system).add_modifier(Modifier::ITALIC),
        LineKind::Broadcast => style.fg(palette.broadcast).add_modifier(Modifier::BOLD),
        LineKind::Location => style.fg(palette.location),
        LineKind::Chat => style.fg(palette.chat),
        LineKind::CommandEcho => style.fg(palette.echo).add_modifier(Modifier::BOLD),
    }
}

fn ansi_color(color: AnsiColor) -> Color {
    match color {
        AnsiColor::Red => Color::Red,
        AnsiColor::Green => Color::Green,
        AnsiColor::Yellow => Color::Yellow,
        AnsiColor::Blue => Color::Blue,
        AnsiColor::Magenta => Color::Magenta,
        AnsiColor::Cyan => Color::Cyan,
    }
}
