//! Render functions for the TUI.
//!
//! Lays out the frame and stacks overlays on top of the browse view.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Paragraph},
    Frame,
};

use super::{cards, detail, help, status, toolbar};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 16;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        app.layout = Default::default();
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    f.render_widget(Block::default().style(app.style("background")), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(1), // category filters
            Constraint::Length(3), // search box
            Constraint::Min(0),    // cards
            Constraint::Length(1), // status bar
        ])
        .split(area);

    toolbar::render_header(f, app, chunks[0]);
    toolbar::render_filters(f, app, chunks[1]);
    toolbar::render_search(f, app, chunks[2]);
    cards::render(f, app, chunks[3]);
    status::render(f, app, chunks[4]);

    app.layout.overlay = None;
    if app.detail_open() {
        detail::render(f, app);
    }

    if app.show_help {
        help::render(f, app);
    }
}

/// Create a centered rectangle with the given percentage of the parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Essay, StaticSource};
    use crate::controller::{ControllerOptions, ViewController};
    use crate::keybindings::KeybindingRegistry;
    use crate::preferences::MemoryPreferences;
    use crate::surface::{ViewBuffer, NO_RESULTS_MESSAGE};
    use ratatui::{backend::TestBackend, Terminal};

    fn app(essays: Vec<Essay>) -> App {
        let mut controller = ViewController::new(
            ViewBuffer::new(),
            Box::new(MemoryPreferences::new()),
            ControllerOptions::default(),
        );
        controller.load(&StaticSource::new(essays));
        App::new(controller, KeybindingRegistry::new())
    }

    fn essay(id: i64, title: &str) -> Essay {
        Essay {
            id,
            title: title.into(),
            category: "Startups".into(),
            category_id: "startups".into(),
            category_color: "#f97316".into(),
            content: "How to start a startup.".into(),
            word_count: 2500,
            reading_time: 10,
            url: "https://example.com/start.html".into(),
        }
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_cards_and_count() {
        let mut app = app(vec![essay(1, "Founder Mode"), essay(2, "Do Things")]);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Founder Mode"));
        assert!(text.contains("Do Things"));
        assert!(text.contains("2 essays"));
        assert!(text.contains("10 min read"));
        assert!(text.contains("2,500 words"));
        assert_eq!(app.layout.cards.len(), 2);
        assert_eq!(app.layout.filters.len(), 2);
    }

    #[test]
    fn test_renders_no_results_placeholder() {
        let mut app = app(vec![essay(1, "Founder Mode")]);
        app.controller.search("xyzzy");
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        assert!(screen(&terminal).contains(NO_RESULTS_MESSAGE));
        assert!(app.layout.cards.is_empty());
    }

    #[test]
    fn test_overlay_region_recorded() {
        let mut app = app(vec![essay(1, "Founder Mode")]);
        app.open_essay(1);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        assert!(app.layout.overlay.is_some());
        assert!(screen(&terminal).contains("https://example.com/start.html"));
    }

    #[test]
    fn test_too_small_terminal() {
        let mut app = app(vec![essay(1, "Founder Mode")]);
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert!(screen(&terminal).contains("Terminal too small"));
    }
}
