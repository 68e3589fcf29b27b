//! The view controller.
//!
//! Owns the loaded collection and the view state derived from it (active
//! category, active search term, the filtered list, which essay is open) and
//! pushes every change to a [`RenderSurface`]. The filtered list is always
//! recomputed from the full collection, never patched in place.

use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;

use crate::catalog::{normalize_query, Category, CategoryKey, DataSource, Essay, SearchIndex};
use crate::debounce::{SearchDebounce, DEFAULT_QUIET_MS};
use crate::preferences::{PreferenceStore, DARK_MODE_KEY};
use crate::surface::{
    DetailView, EssayCard, FilterButton, Label, ListView, RenderSurface, UNAVAILABLE_MESSAGE,
};
use crate::theme::ThemeVariant;

/// Construction options.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Mode used when the preference store has no stored choice.
    pub default_theme: ThemeVariant,
    /// Quiet window for debounced searches.
    pub search_quiet: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            default_theme: ThemeVariant::Light,
            search_quiet: Duration::from_millis(DEFAULT_QUIET_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Pending,
    Loaded,
    Failed,
}

/// Count line: "N essays" when nothing is hidden, else "N of M essays".
pub fn count_text(shown: usize, total: usize) -> String {
    if shown == total {
        format!("{total} essays")
    } else {
        format!("{shown} of {total} essays")
    }
}

pub struct ViewController<S: RenderSurface> {
    surface: S,
    prefs: Box<dyn PreferenceStore>,
    state: LoadState,
    all: Vec<Essay>,
    index: SearchIndex,
    categories: Vec<Category>,
    filtered: Vec<Essay>,
    active_category: CategoryKey,
    search_term: String,
    debounce: SearchDebounce,
    theme: ThemeVariant,
    open_essay: Option<i64>,
}

impl<S: RenderSurface> ViewController<S> {
    /// Create a controller and apply the stored display mode.
    ///
    /// The theme is pushed to the surface before anything else so the first
    /// rendered frame already uses it.
    pub fn new(surface: S, prefs: Box<dyn PreferenceStore>, options: ControllerOptions) -> Self {
        let mut controller = Self {
            surface,
            prefs,
            state: LoadState::Pending,
            all: Vec::new(),
            index: SearchIndex::default(),
            categories: Vec::new(),
            filtered: Vec::new(),
            active_category: CategoryKey::All,
            search_term: String::new(),
            debounce: SearchDebounce::new(options.search_quiet),
            theme: options.default_theme,
            open_essay: None,
        };
        controller.init_theme(options.default_theme);
        controller
    }

    fn init_theme(&mut self, fallback: ThemeVariant) {
        self.theme = match self.prefs.get(DARK_MODE_KEY).as_deref() {
            Some("true") => ThemeVariant::Dark,
            Some("false") => ThemeVariant::Light,
            Some(other) => {
                tracing::warn!(value = %other, "Ignoring unrecognized dark mode preference");
                fallback
            }
            None => fallback,
        };
        tracing::debug!(theme = self.theme.name(), "Applied display mode");
        self.surface.apply_theme(self.theme);
        self.surface
            .set_label(Label::ThemeToggle, self.theme.toggle_label().to_string());
    }

    // ===== Load =====

    /// Load the collection once.
    ///
    /// A failure is shown inline on the list surface and reported as `false`;
    /// it never propagates. Later calls are ignored.
    pub fn load(&mut self, source: &dyn DataSource) -> bool {
        if self.state != LoadState::Pending {
            tracing::warn!("Essay collection already loaded, ignoring reload");
            return false;
        }

        match source.load() {
            Ok(essays) => {
                self.index = SearchIndex::build(&essays);
                self.categories = Category::collect(&essays);
                self.filtered = essays.clone();
                self.all = essays;
                self.state = LoadState::Loaded;
                tracing::info!(
                    essays = self.all.len(),
                    categories = self.categories.len(),
                    "Essay collection ready"
                );
                self.publish_filters();
                self.refresh();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load essay collection");
                self.state = LoadState::Failed;
                self.surface
                    .render_list(ListView::Unavailable(UNAVAILABLE_MESSAGE.to_string()));
                false
            }
        }
    }

    // ===== Filter & search =====

    /// Make `key` the active category. Unknown keys select all essays.
    ///
    /// A search still waiting in the debounce runs first so the new category
    /// composes with the latest typed query.
    pub fn filter_by_category(&mut self, key: &str) {
        if let Some(query) = self.debounce.take_pending() {
            self.search_term = normalize_query(&query);
        }
        self.active_category = CategoryKey::resolve(key, &self.categories);
        tracing::debug!(category = self.active_category.as_str(), "Category selected");
        self.recompute();
        self.publish_filters();
        self.refresh();
    }

    /// Evaluate `query` now. Cancels any pending debounced search.
    pub fn search(&mut self, query: &str) {
        self.debounce.cancel();
        self.search_term = normalize_query(query);
        self.recompute();
        self.refresh();
    }

    /// Schedule `query` for evaluation after the quiet window.
    pub fn request_search(&mut self, query: &str, now: Instant) {
        self.debounce.schedule(query, now);
    }

    /// Run the pending search if its window has elapsed.
    pub fn run_due_search(&mut self, now: Instant) -> bool {
        match self.debounce.take_due(now) {
            Some(query) => {
                self.search(&query);
                true
            }
            None => false,
        }
    }

    /// Run the pending search immediately, if there is one.
    pub fn flush_search(&mut self) -> bool {
        match self.debounce.take_pending() {
            Some(query) => {
                self.search(&query);
                true
            }
            None => false,
        }
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    fn recompute(&mut self) {
        self.filtered = self
            .index
            .apply(&self.all, &self.active_category, &self.search_term);
    }

    // ===== Render =====

    fn publish_filters(&mut self) {
        let buttons = FilterButton::bar(&self.categories, &self.active_category);
        self.surface.render_filters(buttons);
    }

    fn refresh(&mut self) {
        if self.state == LoadState::Failed {
            self.surface
                .render_list(ListView::Unavailable(UNAVAILABLE_MESSAGE.to_string()));
            return;
        }

        let list = if self.filtered.is_empty() {
            ListView::NoResults
        } else {
            ListView::Cards(self.filtered.iter().map(EssayCard::from_essay).collect())
        };
        self.surface.render_list(list);
        self.update_count();
    }

    fn update_count(&mut self) {
        let total = self.all.len();
        self.surface
            .set_label(Label::ResultsCount, count_text(self.filtered.len(), total));
        self.surface.set_label(Label::EssayTotal, total.to_string());
    }

    // ===== Detail overlay =====

    /// Show the essay with `id` in the overlay. Unknown ids do nothing.
    pub fn open_detail(&mut self, id: i64) -> bool {
        let Some(essay) = self.all.iter().find(|e| e.id == id) else {
            tracing::debug!(id, "No essay with this id");
            return false;
        };
        self.surface.show_overlay(DetailView::from_essay(essay));
        self.surface.set_scroll_locked(true);
        self.open_essay = Some(id);
        true
    }

    pub fn close_detail(&mut self) {
        if self.open_essay.take().is_some() {
            self.surface.hide_overlay();
            self.surface.set_scroll_locked(false);
        }
    }

    // ===== Random =====

    /// Open a uniformly chosen essay from the whole collection.
    pub fn pick_random(&mut self) -> Option<i64> {
        self.pick_random_with(&mut rand::rng())
    }

    pub fn pick_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<i64> {
        if self.all.is_empty() {
            return None;
        }
        let id = self.all[rng.random_range(0..self.all.len())].id;
        self.open_detail(id);
        Some(id)
    }

    // ===== Theme =====

    /// Flip dark/light and persist the choice.
    pub fn toggle_theme(&mut self) -> ThemeVariant {
        self.theme = self.theme.toggled();
        self.surface.apply_theme(self.theme);
        self.surface
            .set_label(Label::ThemeToggle, self.theme.toggle_label().to_string());

        let value = if self.theme.is_dark() { "true" } else { "false" };
        if let Err(e) = self.prefs.set(DARK_MODE_KEY, value) {
            tracing::warn!(error = %e, "Failed to persist display mode");
        }
        self.theme
    }

    // ===== Accessors =====

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn all(&self) -> &[Essay] {
        &self.all
    }

    pub fn filtered(&self) -> &[Essay] {
        &self.filtered
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn active_category(&self) -> &CategoryKey {
        &self.active_category
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn theme(&self) -> ThemeVariant {
        self.theme
    }

    pub fn open_essay(&self) -> Option<i64> {
        self.open_essay
    }

    pub fn open_essay_record(&self) -> Option<&Essay> {
        let id = self.open_essay?;
        self.all.iter().find(|e| e.id == id)
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }
}
