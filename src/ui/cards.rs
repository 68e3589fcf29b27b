//! Essay card list widget.

use crate::app::{App, Focus};
use crate::surface::{EssayCard, Label, ListView, NO_RESULTS_MESSAGE};
use crate::theme::category_color;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows per card: title, metadata, preview, spacer.
const CARD_HEIGHT: u16 = 4;

/// Render the card list, or its placeholder, inside a bordered panel.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    app.layout.cards.clear();
    // Guard against zero-sized rects during extreme terminal resizes
    if area.width < 3 || area.height < 3 {
        return;
    }

    let focused = app.focus == Focus::List && !app.detail_open();
    let border_style = if focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(
            " {} ",
            app.controller.surface().label(Label::ResultsCount)
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let message = match app.controller.surface().list() {
        ListView::Cards(cards) if !cards.is_empty() => None,
        ListView::Cards(_) | ListView::NoResults => {
            Some((NO_RESULTS_MESSAGE.to_string(), app.style("placeholder")))
        }
        ListView::Unavailable(msg) => Some((msg.clone(), app.style("error"))),
    };
    if let Some((text, style)) = message {
        let y = inner.y + inner.height / 2;
        let line_area = Rect::new(inner.x, y, inner.width, 1);
        f.render_widget(
            Paragraph::new(text)
                .style(style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            line_area,
        );
        return;
    }

    let visible = (inner.height / CARD_HEIGHT).max(1) as usize;
    clamp_offset(app, visible);

    let width = inner.width as usize;
    let mut hits = Vec::with_capacity(visible);
    let cards = app.cards();
    for (row, (idx, card)) in cards
        .iter()
        .enumerate()
        .skip(app.list_offset)
        .take(visible)
        .enumerate()
    {
        let y = inner.y + row as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(inner.y + inner.height - y);
        let rect = Rect::new(inner.x, y, inner.width, height);
        let lines = card_lines(app, card, idx == app.selected, width);
        f.render_widget(Paragraph::new(lines), rect);
        hits.push((rect, idx));
    }

    app.layout.cards = hits;
}

/// Keep the selected card inside the visible window.
fn clamp_offset(app: &mut App, visible: usize) {
    let count = app.cards().len();
    app.selected = app.selected.min(count.saturating_sub(1));
    if app.selected < app.list_offset {
        app.list_offset = app.selected;
    } else if app.selected >= app.list_offset + visible {
        app.list_offset = app.selected + 1 - visible;
    }
    app.list_offset = app.list_offset.min(count.saturating_sub(visible));
}

fn card_lines<'a>(app: &App, card: &'a EssayCard, selected: bool, width: usize) -> Vec<Line<'a>> {
    let marker = if selected { "▌" } else { " " };
    let badge = format!(" {} ", card.badge);
    let badge_style = app
        .style("badge_text")
        .bg(category_color(&card.color));
    let title_style = if selected {
        app.style("card_selected")
    } else {
        app.style("card_title")
    };
    let marker_style = Style::default().fg(category_color(&card.color));

    // marker + badge + space
    let used = 1 + crate::util::display_width(&badge) + 1;
    let title = truncate_to_width(&card.title, width.saturating_sub(used));

    let meta = format!("{} · {}", card.reading_time, card.word_count);
    let preview = truncate_to_width(&card.preview, width.saturating_sub(2));

    vec![
        Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(badge, badge_style),
            Span::raw(" "),
            Span::styled(title, title_style),
        ]),
        Line::from(vec![
            Span::styled(marker, marker_style),
            Span::raw(" "),
            Span::styled(meta, app.style("card_meta")),
        ]),
        Line::from(vec![
            Span::styled(marker, marker_style),
            Span::raw(" "),
            Span::styled(preview, app.style("card_preview")),
        ]),
        Line::from(""),
    ]
}
