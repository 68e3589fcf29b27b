//! The rendering surface the controller writes to.
//!
//! The controller never draws. It pushes view models (cards, filter buttons,
//! an overlay, a few labels) through [`RenderSurface`], and whatever front
//! end is attached decides how they look. [`ViewBuffer`] is the surface used
//! everywhere: it keeps the latest pushed state so the terminal widgets and
//! the `--print` renderer can draw from it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{Category, CategoryKey, Essay};
use crate::theme::ThemeVariant;
use crate::util::{format_thousands, preview, strip_control_chars};

/// Message shown in place of the list when a search matches nothing.
pub const NO_RESULTS_MESSAGE: &str = "No essays found matching your search.";

/// Message shown in place of the list when the collection failed to load.
pub const UNAVAILABLE_MESSAGE: &str = "Error loading essays. Check the data file and restart.";

// ============================================================================
// View models
// ============================================================================

/// Summary block for one essay in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssayCard {
    pub id: i64,
    pub badge: String,
    pub color: Arc<str>,
    pub title: String,
    pub reading_time: String,
    pub word_count: String,
    pub preview: String,
}

impl EssayCard {
    pub fn from_essay(essay: &Essay) -> Self {
        Self {
            id: essay.id,
            badge: strip_control_chars(&essay.category).into_owned(),
            color: Arc::clone(&essay.category_color),
            title: strip_control_chars(&essay.title).into_owned(),
            reading_time: format!("{} min read", essay.reading_time),
            word_count: format!("{} words", format_thousands(essay.word_count)),
            preview: preview(&strip_control_chars(&essay.content)),
        }
    }
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Cards(Vec<EssayCard>),
    NoResults,
    Unavailable(String),
}

impl Default for ListView {
    fn default() -> Self {
        Self::Cards(Vec::new())
    }
}

impl ListView {
    /// Cards in display order; empty for the placeholder states.
    pub fn cards(&self) -> &[EssayCard] {
        match self {
            Self::Cards(cards) => cards,
            Self::NoResults | Self::Unavailable(_) => &[],
        }
    }
}

/// One entry of the category filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    /// Key passed back to `filter_by_category`.
    pub key: String,
    pub label: String,
    /// Category color; `None` for the "All" button.
    pub color: Option<Arc<str>>,
    pub active: bool,
}

impl FilterButton {
    /// The "All" button followed by one button per category.
    pub fn bar(categories: &[Category], active: &CategoryKey) -> Vec<FilterButton> {
        let all = FilterButton {
            key: CategoryKey::ALL.to_string(),
            label: "All".to_string(),
            color: None,
            active: *active == CategoryKey::All,
        };
        std::iter::once(all)
            .chain(categories.iter().map(|c| FilterButton {
                key: c.id.to_string(),
                label: strip_control_chars(&c.label).into_owned(),
                color: Some(Arc::clone(&c.color)),
                active: active.as_str() == &*c.id,
            }))
            .collect()
    }
}

/// Full essay shown in the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub color: Arc<str>,
    pub reading_time: String,
    pub url: String,
    pub content: String,
}

impl DetailView {
    pub fn from_essay(essay: &Essay) -> Self {
        Self {
            id: essay.id,
            title: strip_control_chars(&essay.title).into_owned(),
            category: strip_control_chars(&essay.category).into_owned(),
            color: Arc::clone(&essay.category_color),
            reading_time: format!("{} min read", essay.reading_time),
            url: strip_control_chars(&essay.url).into_owned(),
            content: strip_control_chars(&essay.content).into_owned(),
        }
    }
}

/// Text labels outside the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// "N essays" / "N of M essays".
    ResultsCount,
    /// Size of the whole collection.
    EssayTotal,
    /// Caption of the dark/light toggle.
    ThemeToggle,
}

// ============================================================================
// Surface trait
// ============================================================================

/// Sink for everything the controller displays.
pub trait RenderSurface {
    fn render_list(&mut self, list: ListView);
    fn render_filters(&mut self, buttons: Vec<FilterButton>);
    fn show_overlay(&mut self, detail: DetailView);
    fn hide_overlay(&mut self);
    fn set_label(&mut self, label: Label, text: String);
    /// Lock or release scrolling of the list behind the overlay.
    fn set_scroll_locked(&mut self, locked: bool);
    fn apply_theme(&mut self, theme: ThemeVariant);
}

// ============================================================================
// ViewBuffer
// ============================================================================

/// Surface that keeps the most recent state pushed to it.
#[derive(Debug, Default)]
pub struct ViewBuffer {
    list: ListView,
    filters: Vec<FilterButton>,
    overlay: Option<DetailView>,
    labels: HashMap<Label, String>,
    scroll_locked: bool,
    theme: ThemeVariant,
    list_renders: usize,
}

impl ViewBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn filters(&self) -> &[FilterButton] {
        &self.filters
    }

    pub fn overlay(&self) -> Option<&DetailView> {
        self.overlay.as_ref()
    }

    pub fn label(&self, label: Label) -> &str {
        self.labels.get(&label).map(String::as_str).unwrap_or("")
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn theme(&self) -> ThemeVariant {
        self.theme
    }

    /// How many times the list has been rendered.
    pub fn list_renders(&self) -> usize {
        self.list_renders
    }

    /// Plain-text rendition of the list and count, for `--print`.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        match &self.list {
            ListView::Cards(cards) => {
                for card in cards {
                    out.push_str(&format!("[{}] {}\n", card.badge, card.title));
                    out.push_str(&format!(
                        "    {} · {}\n",
                        card.reading_time, card.word_count
                    ));
                    if !card.preview.is_empty() {
                        out.push_str(&format!("    {}\n", card.preview));
                    }
                    out.push('\n');
                }
            }
            ListView::NoResults => {
                out.push_str(NO_RESULTS_MESSAGE);
                out.push_str("\n\n");
            }
            ListView::Unavailable(message) => {
                out.push_str(message);
                out.push_str("\n\n");
            }
        }
        out.push_str(self.label(Label::ResultsCount));
        out.push('\n');
        out
    }
}

impl RenderSurface for ViewBuffer {
    fn render_list(&mut self, list: ListView) {
        self.list = list;
        self.list_renders += 1;
    }

    fn render_filters(&mut self, buttons: Vec<FilterButton>) {
        self.filters = buttons;
    }

    fn show_overlay(&mut self, detail: DetailView) {
        self.overlay = Some(detail);
    }

    fn hide_overlay(&mut self) {
        self.overlay = None;
    }

    fn set_label(&mut self, label: Label, text: String) {
        self.labels.insert(label, text);
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn apply_theme(&mut self, theme: ThemeVariant) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn essay() -> Essay {
        Essay {
            id: 9,
            title: "\x1b[31mRed\x1b[0m <b>Title</b>".into(),
            category: "Startups".into(),
            category_id: "startups".into(),
            category_color: "#f97316".into(),
            content: "Line one\n\nline two".into(),
            word_count: 12345,
            reading_time: 49,
            url: "https://example.com/red.html".into(),
        }
    }

    #[test]
    fn test_card_formats_metadata() {
        let card = EssayCard::from_essay(&essay());
        assert_eq!(card.badge, "Startups");
        assert_eq!(card.reading_time, "49 min read");
        assert_eq!(card.word_count, "12,345 words");
        assert_eq!(card.preview, "Line one line two");
    }

    #[test]
    fn test_card_text_is_literal() {
        let card = EssayCard::from_essay(&essay());
        assert_eq!(card.title, "Red <b>Title</b>");
    }

    #[test]
    fn test_preview_counts_only_visible_chars() {
        let mut e = essay();
        e.content = format!("{}{}", "\x07".repeat(100), "b".repeat(200)).into();
        let card = EssayCard::from_essay(&e);
        assert_eq!(card.preview, format!("{}{}", "b".repeat(150), crate::util::ELLIPSIS));
    }

    #[test]
    fn test_preview_keeps_ellipsis_after_escape_sequence() {
        let mut e = essay();
        e.content = format!("{}\x1b[31m{}", "a".repeat(147), "red text ".repeat(10)).into();
        let card = EssayCard::from_essay(&e);
        let visible = format!("{}{}", "a".repeat(147), "red text ".repeat(10));
        let expected: String = visible.chars().take(150).collect();
        assert_eq!(card.preview, format!("{expected}{}", crate::util::ELLIPSIS));
    }

    #[test]
    fn test_detail_keeps_full_content() {
        let detail = DetailView::from_essay(&essay());
        assert_eq!(detail.content, "Line one\n\nline two");
        assert_eq!(detail.reading_time, "49 min read");
        assert_eq!(detail.url, "https://example.com/red.html");
    }

    #[test]
    fn test_filter_bar_marks_active() {
        let categories = Category::collect(&[essay()]);
        let bar = FilterButton::bar(&categories, &CategoryKey::All);
        assert_eq!(bar.len(), 2);
        assert!(bar[0].active);
        assert_eq!(bar[0].key, "all");
        assert!(!bar[1].active);

        let key = CategoryKey::resolve("startups", &categories);
        let bar = FilterButton::bar(&categories, &key);
        assert!(!bar[0].active);
        assert!(bar[1].active);
        assert_eq!(bar[1].color.as_deref(), Some("#f97316"));
    }

    #[test]
    fn test_plain_text_no_results() {
        let mut buf = ViewBuffer::new();
        buf.render_list(ListView::NoResults);
        buf.set_label(Label::ResultsCount, "0 of 3 essays".to_string());
        assert_eq!(
            buf.to_plain_text(),
            format!("{NO_RESULTS_MESSAGE}\n\n0 of 3 essays\n")
        );
    }

    #[test]
    fn test_plain_text_cards() {
        let mut buf = ViewBuffer::new();
        buf.render_list(ListView::Cards(vec![EssayCard::from_essay(&essay())]));
        buf.set_label(Label::ResultsCount, "1 essays".to_string());
        let text = buf.to_plain_text();
        assert!(text.starts_with("[Startups] Red <b>Title</b>\n"));
        assert!(text.contains("49 min read · 12,345 words"));
        assert!(text.ends_with("1 essays\n"));
    }

    #[test]
    fn test_buffer_tracks_overlay_and_lock() {
        let mut buf = ViewBuffer::new();
        assert!(buf.overlay().is_none());
        buf.show_overlay(DetailView::from_essay(&essay()));
        buf.set_scroll_locked(true);
        assert_eq!(buf.overlay().map(|d| d.id), Some(9));
        assert!(buf.scroll_locked());
        buf.hide_overlay();
        buf.set_scroll_locked(false);
        assert!(buf.overlay().is_none());
        assert!(!buf.scroll_locked());
    }
}
