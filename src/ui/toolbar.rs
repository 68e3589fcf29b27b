//! Header line, category filter bar and search box.

use crate::app::{App, Focus};
use crate::surface::Label;
use crate::theme::category_color;
use crate::util::display_width;
use ratatui::{
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Gap between filter buttons.
const BUTTON_GAP: u16 = 1;

/// Title on the left, collection size in the middle, theme toggle on the right.
pub fn render_header(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let surface = app.controller.surface();
    let toggle = format!("[ {} ]", surface.label(Label::ThemeToggle));
    let toggle_width = (display_width(&toggle) as u16).min(area.width);

    let total = surface.label(Label::EssayTotal);
    let left = Line::from(vec![
        Span::styled(" quire ", app.style("detail_title")),
        Span::styled(
            if total.is_empty() {
                String::new()
            } else {
                format!(" {total} essays in the collection")
            },
            app.style("card_meta"),
        ),
    ]);

    let left_area = Rect {
        width: area.width.saturating_sub(toggle_width),
        ..area
    };
    let toggle_area = Rect {
        x: area.x + area.width - toggle_width,
        width: toggle_width,
        ..area
    };

    f.render_widget(Paragraph::new(left), left_area);
    f.render_widget(
        Paragraph::new(toggle).style(app.style("filter_inactive")),
        toggle_area,
    );
    app.layout.theme_toggle = toggle_area;
}

/// One row of category buttons. Buttons that do not fit are left off.
pub fn render_filters(f: &mut Frame, app: &mut App, area: Rect) {
    app.layout.filters.clear();
    if area.width < 1 || area.height < 1 {
        return;
    }

    let mut x = area.x;
    let right = area.x + area.width;
    let mut hits = Vec::new();

    for button in app.controller.surface().filters() {
        let text = format!(" {} ", button.label);
        let width = display_width(&text) as u16;
        if x + width > right {
            break;
        }

        let style = if button.active {
            app.style("filter_active")
        } else {
            match &button.color {
                Some(css) => app
                    .style("filter_inactive")
                    .fg(category_color(css))
                    .add_modifier(Modifier::BOLD),
                None => app.style("filter_inactive"),
            }
        };

        let rect = Rect::new(x, area.y, width, 1);
        f.render_widget(Paragraph::new(Span::styled(text, style)), rect);
        hits.push((rect, button.key.clone()));
        x += width + BUTTON_GAP;
    }

    app.layout.filters = hits;
}

/// Bordered search box with a placeholder and a cursor while focused.
pub fn render_search(f: &mut Frame, app: &mut App, area: Rect) {
    app.layout.search_box = area;
    if area.width < 3 || area.height < 3 {
        return;
    }

    let focused = app.focus == Focus::Search;
    let border_style = if focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search ");
    let inner = block.inner(area);

    let line = if app.search_input.is_empty() && !focused {
        let hint = app
            .keybindings
            .key_hint(crate::keybindings::Action::EnterSearch)
            .unwrap_or_else(|| "/".to_string());
        Line::from(Span::styled(
            format!("Search titles, text and categories ({hint})"),
            app.style("search_placeholder"),
        ))
    } else {
        Line::from(Span::styled(
            visible_tail(&app.search_input, inner.width.saturating_sub(1) as usize),
            app.style("search_text"),
        ))
    };

    f.render_widget(Paragraph::new(line).block(block), area);

    if focused && inner.width > 0 {
        let shown = visible_tail(&app.search_input, inner.width.saturating_sub(1) as usize);
        let cursor_x = inner.x + (display_width(shown) as u16).min(inner.width - 1);
        f.set_cursor_position(Position::new(cursor_x, inner.y));
    }
}

/// The longest suffix of `s` that fits in `width` columns.
fn visible_tail(s: &str, width: usize) -> &str {
    let mut start = 0;
    for (idx, _) in s.char_indices() {
        if display_width(&s[idx..]) <= width {
            start = idx;
            break;
        }
        start = s.len();
    }
    &s[start..]
}
