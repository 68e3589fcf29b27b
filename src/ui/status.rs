use crate::app::{App, Focus};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // Status bar needs at least 1 char width to be meaningful
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Cow avoids allocations for static hints and borrowed status messages
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.focus == Focus::Search {
        Cow::Borrowed("Type to search | ESC leave | ENTER search now | Ctrl+u clear")
    } else if app.detail_open() {
        Cow::Borrowed("[Esc]close [j/k]scroll [Ctrl+d/u]page [o]pen original [r]andom [q]uit")
    } else {
        Cow::Borrowed(
            "[/]search [Enter]open [Tab]category [r]andom [t]heme [o]pen original [?]help [q]uit",
        )
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
