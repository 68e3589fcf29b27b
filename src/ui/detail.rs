//! Essay overlay widget.

use crate::app::{App, MAX_SCROLL};
use crate::theme::category_color;
use crate::util::display_width;
use ratatui::{
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::render::centered_rect;

/// Lines above the essay body: badge, link, key hint, spacer.
const HEADER_LINES: usize = 4;

/// Render the open essay centered over the list.
pub fn render(f: &mut Frame, app: &mut App) {
    let overlay = centered_rect(86, 86, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }
    app.layout.overlay = Some(overlay);

    let body_width = overlay.width.saturating_sub(2) as usize;
    let Some(content_lines) = app
        .controller
        .surface()
        .overlay()
        .map(|d| HEADER_LINES + wrapped_line_count(&d.content, body_width))
    else {
        return;
    };

    // Clamp before drawing so a resize never shows an out-of-range frame
    app.detail_visible_lines = overlay.height.saturating_sub(2) as usize;
    app.detail_content_lines = content_lines;
    app.clamp_detail_scroll();
    let scroll = app.detail_scroll.min(MAX_SCROLL) as u16;

    let Some(detail) = app.controller.surface().overlay() else {
        return;
    };

    let badge_style = app
        .style("badge_text")
        .bg(category_color(&detail.color));
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", detail.category), badge_style),
            Span::raw("  "),
            Span::styled(detail.reading_time.as_str(), app.style("detail_meta")),
        ]),
        Line::from(Span::styled(detail.url.as_str(), app.style("detail_link"))),
        Line::from(Span::styled(
            "Esc close · o open original · j/k scroll",
            app.style("detail_meta"),
        )),
        Line::from(""),
    ];
    lines.extend(
        detail
            .content
            .lines()
            .map(|l| Line::from(Span::styled(l, app.style("detail_body")))),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(Span::styled(
            format!(" {} ", detail.title),
            app.style("detail_title"),
        ))
        .style(app.style("background"));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, overlay);
    f.render_widget(paragraph.scroll((scroll, 0)), overlay);
}

/// Display lines `text` occupies when wrapped at `width` columns.
fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    text.lines()
        .map(|line| display_width(line).div_ceil(width).max(1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_line_count() {
        assert_eq!(wrapped_line_count("", 10), 0);
        assert_eq!(wrapped_line_count("short", 10), 1);
        assert_eq!(wrapped_line_count("a\n\nb", 10), 3);
        assert_eq!(wrapped_line_count(&"x".repeat(25), 10), 3);
        assert_eq!(wrapped_line_count("anything", 0), 0);
    }
}
