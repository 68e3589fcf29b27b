//! Help overlay listing every active binding, user overrides included.

use super::render::centered_rect;
use crate::app::App;
use crate::keybindings::{Context, KeybindingRegistry};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

/// Context display order for the help screen.
const CONTEXT_ORDER: [Context; 4] = [
    Context::Global,
    Context::List,
    Context::Detail,
    Context::Search,
];

/// One help row: a section heading or a key with its description.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HelpRow {
    Heading(&'static str),
    Binding(String, &'static str),
    Spacer,
}

/// Bindings grouped by context, with a spacer between non-empty groups.
fn help_rows(registry: &KeybindingRegistry) -> Vec<HelpRow> {
    let bindings = registry.all_bindings();
    let mut rows = Vec::new();

    for ctx in CONTEXT_ORDER {
        let mut group = bindings
            .iter()
            .filter(|(c, _, _, _)| *c == ctx)
            .peekable();
        if group.peek().is_none() {
            continue;
        }
        if !rows.is_empty() {
            rows.push(HelpRow::Spacer);
        }
        rows.push(HelpRow::Heading(ctx.name()));
        rows.extend(group.map(|(_, key, _, desc)| HelpRow::Binding(key.clone(), desc)));
    }
    rows
}

/// Render the help overlay on top of whatever is showing.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(70, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }
    f.render_widget(Clear, overlay);

    let rows = help_rows(&app.keybindings);

    // 2 for the border, 2 for the header and its margin
    let visible = overlay.height.saturating_sub(4) as usize;
    let max_scroll = rows.len().saturating_sub(visible);
    let scroll = app.help_scroll_offset.min(max_scroll);

    let table_rows: Vec<Row> = rows
        .into_iter()
        .skip(scroll)
        .take(visible)
        .map(|row| match row {
            HelpRow::Heading(name) => Row::new(vec![
                Line::from(Span::styled(
                    format!("-- {name} --"),
                    app.style("help_heading"),
                )),
                Line::from(""),
            ]),
            HelpRow::Binding(key, desc) => Row::new(vec![
                Line::from(format!("  {key}")),
                Line::from(desc),
            ]),
            HelpRow::Spacer => Row::new(vec![Line::from(""), Line::from("")]),
        })
        .collect();

    let title = if max_scroll > 0 {
        format!(" Keys ({}/{}) ", scroll + 1, max_scroll + 1)
    } else {
        " Keys (? to close) ".to_string()
    };

    let table = Table::new(table_rows, [Constraint::Length(18), Constraint::Min(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title)
                .style(app.style("background")),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
                .bottom_margin(1),
        )
        .style(app.style("detail_body"));
    f.render_widget(table, overlay);

    if scroll < max_scroll {
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height - 1,
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(
            Paragraph::new(Span::styled(
                " j/k scroll, ? or Esc close ",
                app.style("detail_meta"),
            )),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_rows_start_with_global_heading() {
        let rows = help_rows(&KeybindingRegistry::new());
        assert_eq!(rows[0], HelpRow::Heading(Context::Global.name()));
        assert!(rows.iter().any(|r| matches!(r, HelpRow::Binding(k, _) if k == "q")));
        assert_ne!(rows.last(), Some(&HelpRow::Spacer));
    }

    #[test]
    fn test_every_context_has_a_heading() {
        let rows = help_rows(&KeybindingRegistry::new());
        for ctx in CONTEXT_ORDER {
            assert!(rows.contains(&HelpRow::Heading(ctx.name())));
        }
    }

    #[test]
    fn test_override_shows_in_rows() {
        let mut registry = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("random_essay".to_string(), "x".to_string());
        registry.apply_overrides(&overrides);
        let rows = help_rows(&registry);
        assert!(rows
            .iter()
            .any(|r| matches!(r, HelpRow::Binding(k, d) if k == "x" && *d == crate::keybindings::Action::RandomEssay.describe())));
    }
}
