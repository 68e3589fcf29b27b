use crate::controller::ViewController;
use crate::keybindings::KeybindingRegistry;
use crate::surface::{EssayCard, ViewBuffer};
use crate::theme::{StyleMap, ThemeVariant};
use crate::util::{validate_url_for_open, MAX_SEARCH_QUERY_LENGTH};
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::time::Instant;

/// Maximum scroll offset for the essay overlay (ratatui u16 limit).
pub const MAX_SCROLL: usize = u16::MAX as usize;

/// Lines moved by a page scroll in the essay overlay.
pub const PAGE_LINES: usize = 20;

// ============================================================================
// Focus
// ============================================================================

/// Which widget receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
}

// ============================================================================
// Layout cache
// ============================================================================

/// Screen regions from the last frame, used to hit-test mouse clicks.
#[derive(Debug, Default, Clone)]
pub struct LayoutCache {
    pub theme_toggle: Rect,
    pub search_box: Rect,
    /// Filter button regions with their category keys.
    pub filters: Vec<(Rect, String)>,
    /// Card regions with their index into the card list.
    pub cards: Vec<(Rect, usize)>,
    pub overlay: Option<Rect>,
}

impl LayoutCache {
    pub fn filter_at(&self, pos: Position) -> Option<&str> {
        self.filters
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, key)| key.as_str())
    }

    pub fn card_at(&self, pos: Position) -> Option<usize> {
        self.cards
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, idx)| *idx)
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state for the terminal front end.
pub struct App {
    pub controller: ViewController<ViewBuffer>,

    /// Active style map, rebuilt whenever the display mode flips.
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    // UI State
    pub focus: Focus,
    /// Selected card index into the rendered card list.
    pub selected: usize,
    /// First card drawn in the list viewport.
    pub list_offset: usize,

    // Search box contents. The controller owns the evaluated term.
    pub search_input: String,

    // Essay overlay
    pub detail_scroll: usize,
    /// Visible lines in the overlay body, updated during rendering.
    pub detail_visible_lines: usize,
    /// Wrapped line count of the overlay body, updated during rendering.
    pub detail_content_lines: usize,

    /// Status message with expiry. Cow avoids allocation for static literals.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,

    pub show_help: bool,
    pub help_scroll_offset: usize,

    pub layout: LayoutCache,
}

impl App {
    pub fn new(controller: ViewController<ViewBuffer>, keybindings: KeybindingRegistry) -> Self {
        let theme = StyleMap::from_palette(&controller.theme().palette());
        Self {
            controller,
            theme,
            keybindings,
            focus: Focus::List,
            selected: 0,
            list_offset: 0,
            search_input: String::new(),
            detail_scroll: 0,
            detail_visible_lines: 0,
            detail_content_lines: 0,
            status_message: None,
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
            layout: LayoutCache::default(),
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn cards(&self) -> &[EssayCard] {
        self.controller.surface().list().cards()
    }

    pub fn selected_card(&self) -> Option<&EssayCard> {
        self.cards().get(self.selected)
    }

    pub fn detail_open(&self) -> bool {
        self.controller.surface().overlay().is_some()
    }

    /// The list behind the overlay must not move while it is locked.
    fn list_locked(&self) -> bool {
        self.controller.surface().scroll_locked()
    }

    // ===== List navigation =====

    pub fn nav_up(&mut self) {
        if !self.list_locked() {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    pub fn nav_down(&mut self) {
        if self.list_locked() || self.cards().is_empty() {
            return;
        }
        let max_index = self.cards().len().saturating_sub(1);
        self.selected = self.selected.saturating_add(1).min(max_index);
    }

    pub fn nav_top(&mut self) {
        if !self.list_locked() {
            self.selected = 0;
        }
    }

    pub fn nav_bottom(&mut self) {
        if !self.list_locked() {
            self.selected = self.cards().len().saturating_sub(1);
        }
    }

    /// Reset selection after the visible list was recomputed.
    fn list_changed(&mut self) {
        self.selected = 0;
        self.list_offset = 0;
        self.needs_redraw = true;
    }

    // ===== Categories =====

    pub fn select_category(&mut self, key: &str) {
        self.controller.filter_by_category(key);
        self.list_changed();
    }

    /// Move the active filter button forward or back, wrapping around.
    pub fn cycle_category(&mut self, forward: bool) {
        let filters = self.controller.surface().filters();
        if filters.is_empty() {
            return;
        }
        let current = filters.iter().position(|b| b.active).unwrap_or(0);
        let len = filters.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        let key = filters[next].key.clone();
        self.select_category(&key);
    }

    // ===== Search box =====

    pub fn enter_search(&mut self) {
        self.focus = Focus::Search;
    }

    /// Leave the search box. A pending search still fires on schedule.
    pub fn exit_search(&mut self) {
        self.focus = Focus::List;
    }

    /// Leave the search box and evaluate the typed query now.
    pub fn commit_search(&mut self) {
        self.focus = Focus::List;
        self.controller.search(&self.search_input);
        self.list_changed();
    }

    pub fn push_search_char(&mut self, c: char, now: Instant) {
        if self.search_input.chars().count() >= MAX_SEARCH_QUERY_LENGTH {
            self.set_status(format!(
                "Search query at max length ({} chars)",
                MAX_SEARCH_QUERY_LENGTH
            ));
            return;
        }
        self.search_input.push(c);
        self.controller.request_search(&self.search_input, now);
    }

    pub fn pop_search_char(&mut self, now: Instant) {
        if self.search_input.pop().is_some() {
            self.controller.request_search(&self.search_input, now);
        }
    }

    pub fn clear_search_input(&mut self, now: Instant) {
        if !self.search_input.is_empty() {
            self.search_input.clear();
            self.controller.request_search("", now);
        }
    }

    /// Run the debounced search if due. Returns true when the list changed.
    pub fn run_due_search(&mut self, now: Instant) -> bool {
        if self.controller.run_due_search(now) {
            self.list_changed();
            true
        } else {
            false
        }
    }

    // ===== Essay overlay =====

    pub fn open_selected(&mut self) {
        if let Some(id) = self.selected_card().map(|c| c.id) {
            self.open_essay(id);
        }
    }

    pub fn open_essay(&mut self, id: i64) {
        if self.controller.open_detail(id) {
            self.detail_scroll = 0;
            self.detail_content_lines = 0;
            self.needs_redraw = true;
        }
    }

    pub fn close_detail(&mut self) {
        self.controller.close_detail();
        self.detail_scroll = 0;
        self.needs_redraw = true;
    }

    pub fn open_random(&mut self) {
        match self.controller.pick_random() {
            Some(_) => {
                self.detail_scroll = 0;
                self.detail_content_lines = 0;
            }
            None => self.set_status("No essays to pick from"),
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.detail_scroll = self.detail_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.detail_scroll = self.detail_scroll.saturating_add(lines);
        self.clamp_detail_scroll();
    }

    /// Keep the overlay from scrolling past the end of the essay.
    pub fn clamp_detail_scroll(&mut self) {
        let max_scroll = self
            .detail_content_lines
            .saturating_sub(self.detail_visible_lines);
        self.detail_scroll = self.detail_scroll.min(max_scroll).min(MAX_SCROLL);
    }

    /// Open the source link of the open essay, or of the selected card.
    pub fn open_source(&mut self) {
        let url = match self.controller.open_essay_record() {
            Some(essay) => Some(essay.url.clone()),
            None => self.selected_card().and_then(|card| {
                self.controller
                    .all()
                    .iter()
                    .find(|e| e.id == card.id)
                    .map(|e| e.url.clone())
            }),
        };
        let Some(url) = url else {
            return;
        };

        match validate_url_for_open(&url) {
            Err(e) => self.set_status(e.to_string()),
            Ok(valid) => {
                if let Err(e) = open::that(valid.as_str()) {
                    self.set_status(format!("Failed to open browser: {}", e));
                } else {
                    self.set_status("Opened in browser");
                }
            }
        }
    }

    // ===== Theme =====

    pub fn toggle_theme(&mut self) {
        let variant = self.controller.toggle_theme();
        self.set_theme(variant);
        self.set_status(format!("{} mode", variant.name()));
    }

    fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    // ===== Status bar =====

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds).
    /// Returns true if a message was actually cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Essay, StaticSource};
    use crate::controller::ControllerOptions;
    use crate::preferences::MemoryPreferences;
    use std::time::Duration;

    fn essay(id: i64, cat: &str) -> Essay {
        Essay {
            id,
            title: format!("Essay {id}").into(),
            category: cat.into(),
            category_id: cat.into(),
            category_color: "#22c55e".into(),
            content: "text".into(),
            word_count: 10,
            reading_time: 1,
            url: "https://example.com/e.html".into(),
        }
    }

    fn app() -> App {
        let mut controller = ViewController::new(
            ViewBuffer::new(),
            Box::new(MemoryPreferences::new()),
            ControllerOptions::default(),
        );
        controller.load(&StaticSource::new(vec![
            essay(1, "a"),
            essay(2, "b"),
            essay(3, "a"),
        ]));
        App::new(controller, KeybindingRegistry::new())
    }

    #[test]
    fn test_nav_clamps_to_list() {
        let mut app = app();
        app.nav_up();
        assert_eq!(app.selected, 0);
        for _ in 0..10 {
            app.nav_down();
        }
        assert_eq!(app.selected, 2);
        app.nav_top();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_list_locked_while_overlay_open() {
        let mut app = app();
        app.open_selected();
        assert!(app.detail_open());
        app.nav_down();
        assert_eq!(app.selected, 0);
        app.close_detail();
        app.nav_down();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_cycle_category_wraps() {
        let mut app = app();
        app.cycle_category(true);
        assert_eq!(app.controller.active_category().as_str(), "a");
        app.cycle_category(true);
        assert_eq!(app.controller.active_category().as_str(), "b");
        app.cycle_category(true);
        assert_eq!(app.controller.active_category().as_str(), "all");
        app.cycle_category(false);
        assert_eq!(app.controller.active_category().as_str(), "b");
    }

    #[tokio::test(start_paused = true)]
    async fn test_typed_search_waits_for_quiet_window() {
        let mut app = app();
        app.enter_search();
        for c in "essay 2".chars() {
            app.push_search_char(c, Instant::now());
        }
        assert!(!app.run_due_search(Instant::now()));
        assert_eq!(app.cards().len(), 3);

        tokio::time::advance(Duration::from_millis(300)).await;
        assert!(app.run_due_search(Instant::now()));
        assert_eq!(app.cards().len(), 1);
    }

    #[test]
    fn test_commit_search_runs_immediately() {
        let mut app = app();
        app.enter_search();
        app.push_search_char('3', Instant::now());
        app.commit_search();
        assert_eq!(app.focus, Focus::List);
        assert_eq!(app.cards().len(), 1);
        assert_eq!(app.controller.search_deadline(), None);
    }

    #[test]
    fn test_toggle_theme_sets_status() {
        let mut app = app();
        app.toggle_theme();
        assert_eq!(app.controller.theme(), ThemeVariant::Dark);
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| m.as_ref()),
            Some("Dark mode")
        );
    }

    #[test]
    fn test_layout_hit_testing() {
        let layout = LayoutCache {
            filters: vec![(Rect::new(0, 2, 5, 1), "all".to_string())],
            cards: vec![(Rect::new(0, 6, 40, 4), 0), (Rect::new(0, 10, 40, 4), 1)],
            ..LayoutCache::default()
        };
        assert_eq!(layout.filter_at(Position::new(3, 2)), Some("all"));
        assert_eq!(layout.filter_at(Position::new(6, 2)), None);
        assert_eq!(layout.card_at(Position::new(10, 11)), Some(1));
        assert_eq!(layout.card_at(Position::new(10, 20)), None);
    }
}
