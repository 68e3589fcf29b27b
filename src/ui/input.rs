//! Input handling for the TUI.
//!
//! Keys are dispatched by what currently has input: the help overlay, the
//! search box, the essay overlay, or the card list. Mouse clicks are
//! hit-tested against the regions recorded by the last frame.

use crate::app::{App, Focus, PAGE_LINES};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use tokio::time::Instant;

use super::Action;

/// Lines moved per mouse wheel notch in the essay overlay.
const WHEEL_LINES: usize = 3;

/// Main input dispatch function.
pub(super) fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    // Help overlay captures all keys while visible
    if app.show_help {
        handle_help_input(app, code);
        return Action::Continue;
    }

    if app.focus == Focus::Search {
        return handle_search_input(app, code, modifiers);
    }

    let context = if app.detail_open() {
        KbContext::Detail
    } else {
        KbContext::List
    };
    match app.keybindings.action_for_key(code, modifiers, context) {
        Some(action) => dispatch(app, action),
        None => Action::Continue,
    }
}

/// Run a bound action outside the search box.
fn dispatch(app: &mut App, action: KbAction) -> Action {
    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::NavTop => app.nav_top(),
        KbAction::NavBottom => app.nav_bottom(),
        KbAction::OpenEssay => app.open_selected(),
        KbAction::CloseDetail => app.close_detail(),
        KbAction::EnterSearch => {
            if app.detail_open() {
                app.close_detail();
            }
            app.enter_search();
        }
        // Only meaningful inside the search box
        KbAction::ExitSearch | KbAction::CommitSearch => {}
        KbAction::NextCategory => app.cycle_category(true),
        KbAction::PrevCategory => app.cycle_category(false),
        KbAction::AllCategories => app.select_category(crate::catalog::CategoryKey::ALL),
        KbAction::RandomEssay => app.open_random(),
        KbAction::ToggleTheme => app.toggle_theme(),
        KbAction::OpenSource => app.open_source(),
        KbAction::ScrollDown => app.scroll_down(1),
        KbAction::ScrollUp => app.scroll_up(1),
        KbAction::PageDown => app.scroll_down(PAGE_LINES),
        KbAction::PageUp => app.scroll_up(PAGE_LINES),
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
    }
    Action::Continue
}

/// Handle input while the help overlay is visible.
///
/// j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
}

/// Handle input while the search box has focus.
///
/// Only keys bound in the Search context are actions; everything else edits
/// the query, and every edit reschedules the debounced search.
fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match app
        .keybindings
        .action_in_context(code, modifiers, KbContext::Search)
    {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::ExitSearch) => app.exit_search(),
        Some(KbAction::CommitSearch) => app.commit_search(),
        Some(_) => {}
        None => {
            let now = Instant::now();
            match code {
                KeyCode::Backspace => app.pop_search_char(now),
                KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                    app.clear_search_input(now)
                }
                KeyCode::Char(c)
                    if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    app.push_search_char(c, now)
                }
                _ => {}
            }
        }
    }
    Action::Continue
}

/// Handle a mouse event. Returns true when anything changed.
pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) -> bool {
    let pos = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, pos),
        MouseEventKind::ScrollDown => {
            if app.detail_open() {
                app.scroll_down(WHEEL_LINES);
            } else {
                app.nav_down();
            }
            true
        }
        MouseEventKind::ScrollUp => {
            if app.detail_open() {
                app.scroll_up(WHEEL_LINES);
            } else {
                app.nav_up();
            }
            true
        }
        _ => false,
    }
}

fn handle_click(app: &mut App, pos: Position) -> bool {
    if app.show_help {
        app.show_help = false;
        app.help_scroll_offset = 0;
        return true;
    }

    // A click outside the overlay dismisses it; clicks inside do nothing.
    if app.detail_open() {
        let inside = app.layout.overlay.is_some_and(|rect| rect.contains(pos));
        if !inside {
            app.close_detail();
        }
        return !inside;
    }

    if app.layout.theme_toggle.contains(pos) {
        app.toggle_theme();
        return true;
    }

    if app.layout.search_box.contains(pos) {
        app.enter_search();
        return true;
    }

    if let Some(key) = app.layout.filter_at(pos).map(str::to_owned) {
        app.exit_search();
        app.select_category(&key);
        return true;
    }

    if let Some(idx) = app.layout.card_at(pos) {
        app.exit_search();
        app.selected = idx;
        app.open_selected();
        return true;
    }

    if app.focus == Focus::Search {
        app.exit_search();
        return true;
    }
    false
}
