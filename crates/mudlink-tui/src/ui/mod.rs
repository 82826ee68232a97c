//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod help;
mod history;
mod input;
mod inventory;
mod map;
mod output;
mod status;

use mudlink_app::{App, Panel, Theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Block,
};

/// Colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background.
    pub background: Color,
    /// Default text.
    pub foreground: Color,
    /// Borders, hints and empty cells.
    pub muted: Color,
    /// Titles and highlighted selections.
    pub accent: Color,
    /// Error lines.
    pub error: Color,
    /// System notices.
    pub system: Color,
    /// Broadcasts.
    pub broadcast: Color,
    /// Room descriptions.
    pub location: Color,
    /// Chat.
    pub chat: Color,
    /// Echoed commands.
    pub echo: Color,
    /// Status bar background.
    pub status_bg: Color,
}

impl Palette {
    /// Palette for `theme`.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Black,
                foreground: Color::Gray,
                muted: Color::DarkGray,
                accent: Color::LightCyan,
                error: Color::LightRed,
                system: Color::LightBlue,
                broadcast: Color::LightMagenta,
                location: Color::LightGreen,
                chat: Color::LightYellow,
                echo: Color::White,
                status_bg: Color::DarkGray,
            },
            Theme::Light => Self {
                background: Color::White,
                foreground: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                error: Color::Red,
                system: Color::Blue,
                broadcast: Color::Magenta,
                location: Color::Green,
                chat: Color::Rgb(160, 110, 0),
                echo: Color::DarkGray,
                status_bg: Color::Gray,
            },
        }
    }

    /// Style for panel borders and default text.
    pub fn base(self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }
}

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let palette = Palette::for_theme(app.theme());
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, palette, *main_area);
    input::render(frame, app, palette, *input_area);
    status::render(frame, app, palette, *status_area);
}

/// Render the main area (output + side panel).
fn render_main_area(frame: &mut Frame, app: &App, palette: Palette, area: Rect) {
    const PANEL_WIDTH: u16 = 34;
    const OUTPUT_AREA_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(OUTPUT_AREA_MIN_WIDTH), Constraint::Length(PANEL_WIDTH)])
        .split(area);

    let [output_area, panel_area] = chunks.as_ref() else {
        return;
    };

    output::render(frame, app, palette, *output_area);
    match app.panel() {
        Panel::History => history::render(frame, app, palette, *panel_area),
        Panel::Inventory => inventory::render(frame, app, palette, *panel_area),
        Panel::Map => map::render(frame, app, palette, *panel_area),
        Panel::Help => help::render(frame, palette, *panel_area),
    }
}

/// Bordered block with a title in the palette's colours.
fn panel_block(title: &str, palette: Palette) -> Block<'_> {
    Block::bordered()
        .title(format!(" {title} "))
        .border_style(Style::default().fg(palette.muted))
        .title_style(Style::default().fg(palette.accent))
        .style(palette.base())
}

#[cfg(test)]
mod tests {
    use mudlink_app::{AppConfig, AppEvent, KeyInput, Settings};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;

    pub(super) fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        terminal.draw(|frame| render(frame, app)).expect("draw");
        terminal.backend().buffer().clone()
    }

    pub(super) fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut lines = Vec::new();
        for y in 0..area.height {
            let mut line = String::new();
            for x in 0..area.width {
                line.push_str(buffer[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_owned());
        }
        lines.join("\n")
    }

    pub(super) fn app() -> App {
        App::new(AppConfig::new("ws://localhost:5000/ws"))
    }

    #[test]
    fn dark_theme_background() {
        let buffer = draw(&app(), 80, 24);
        assert_eq!(buffer[(0, 0)].style().bg, Some(Color::Black));
    }

    #[test]
    fn light_theme_background() {
        let mut config = AppConfig::new("ws://localhost:5000/ws");
        config.settings = Settings { dark_mode: false, server_url: None };
        let buffer = draw(&App::new(config), 80, 24);

        assert_eq!(buffer[(0, 0)].style().bg, Some(Color::White));
        assert!(screen_text(&buffer).contains("F6 Dark Mode"));
    }

    #[test]
    fn tab_switches_panel_title() {
        let mut app = app();
        assert!(screen_text(&draw(&app, 80, 24)).contains(" History "));

        let _ = app.handle(AppEvent::Key(KeyInput::Tab));
        assert!(screen_text(&draw(&app, 80, 24)).contains(" Inventory "));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let _ = draw(&app(), 10, 3);
        let _ = draw(&app(), 1, 1);
    }
}
