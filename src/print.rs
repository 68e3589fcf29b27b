//! Non-interactive listing for `--print`.
//!
//! Drives the same controller as the terminal front end against an in-memory
//! surface and writes the result as plain text, so scripts see exactly what
//! the browser would show.

use crate::catalog::DataSource;
use crate::controller::{ControllerOptions, ViewController};
use crate::preferences::MemoryPreferences;
use crate::surface::ViewBuffer;

/// What to show before printing.
#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    /// Category key; unknown keys fall back to all categories.
    pub category: Option<String>,
    /// Search text, applied immediately.
    pub search: Option<String>,
}

/// Rendered listing plus whether the collection loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub text: String,
    pub loaded: bool,
}

/// Load `source`, apply `options` and render the card list as text.
pub fn render_listing(source: &dyn DataSource, options: &PrintOptions) -> Listing {
    // Print mode never persists a display mode.
    let mut controller = ViewController::new(
        ViewBuffer::new(),
        Box::new(MemoryPreferences::new()),
        ControllerOptions::default(),
    );
    let loaded = controller.load(source);

    if let Some(key) = &options.category {
        controller.filter_by_category(key);
    }
    if let Some(query) = &options.search {
        controller.search(query);
    }

    tracing::debug!(
        loaded,
        shown = controller.filtered().len(),
        "Rendered plain listing"
    );

    Listing {
        text: controller.surface().to_plain_text(),
        loaded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Essay, StaticSource};
    use crate::surface::{NO_RESULTS_MESSAGE, UNAVAILABLE_MESSAGE};

    fn essay(id: i64, title: &str, category_id: &str) -> Essay {
        Essay {
            id,
            title: title.into(),
            category: category_id.to_uppercase().into(),
            category_id: category_id.into(),
            category_color: "#3b82f6".into(),
            content: format!("Text of {title}.").into(),
            word_count: 1200,
            reading_time: 5,
            url: "https://example.com".into(),
        }
    }

    fn source() -> StaticSource {
        StaticSource::new(vec![
            essay(1, "Beating the Averages", "programming"),
            essay(2, "Startup = Growth", "startups"),
            essay(3, "Hackers and Painters", "programming"),
        ])
    }

    #[test]
    fn test_print_all() {
        let listing = render_listing(&source(), &PrintOptions::default());
        assert!(listing.loaded);
        assert!(listing.text.contains("Beating the Averages"));
        assert!(listing.text.contains("Startup = Growth"));
        assert!(listing.text.ends_with("3 essays\n"));
    }

    #[test]
    fn test_print_category_and_search() {
        let options = PrintOptions {
            category: Some("programming".into()),
            search: Some("HACKERS".into()),
        };
        let listing = render_listing(&source(), &options);
        assert!(listing.text.contains("Hackers and Painters"));
        assert!(!listing.text.contains("Beating the Averages"));
        assert!(listing.text.ends_with("1 of 3 essays\n"));
    }

    #[test]
    fn test_print_no_results() {
        let options = PrintOptions {
            category: None,
            search: Some("xyzzy".into()),
        };
        let listing = render_listing(&source(), &options);
        assert!(listing.text.contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_print_unavailable() {
        let listing = render_listing(&StaticSource::unavailable(), &PrintOptions::default());
        assert!(!listing.loaded);
        assert!(listing.text.contains(UNAVAILABLE_MESSAGE));
    }
}
