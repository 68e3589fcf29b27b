//! Category and search predicates.
//!
//! A visible list is always derived from the full collection in two steps:
//! keep the essays in the active category, then keep those matching the
//! active search term. Both steps preserve collection order.

use std::sync::Arc;

use super::types::{Category, Essay};

/// Active category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryKey {
    #[default]
    All,
    Id(Arc<str>),
}

impl CategoryKey {
    /// Sentinel key that selects the whole collection.
    pub const ALL: &'static str = "all";

    /// Resolve a raw key against the known categories.
    ///
    /// Unknown keys fall back to `All`.
    pub fn resolve(key: &str, categories: &[Category]) -> Self {
        if key == Self::ALL {
            return Self::All;
        }
        match categories.iter().find(|c| &*c.id == key) {
            Some(category) => Self::Id(Arc::clone(&category.id)),
            None => {
                tracing::debug!(key = %key, "Unknown category key, showing all essays");
                Self::All
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Id(id) => id,
        }
    }

    pub fn matches(&self, essay: &Essay) -> bool {
        match self {
            Self::All => true,
            Self::Id(id) => essay.category_id == *id,
        }
    }
}

/// Trim and lowercase a raw query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Reference search predicate: does the essay's title, content or category
/// label contain `term`, ignoring case?
///
/// `term` must already be normalized. An empty term matches everything.
pub fn matches_search(essay: &Essay, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    essay.title.to_lowercase().contains(term)
        || essay.content.to_lowercase().contains(term)
        || essay.category.to_lowercase().contains(term)
}

/// Lowercased copies of the searchable fields, built once per load so a
/// keystroke does not re-fold every essay body.
#[derive(Debug, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

#[derive(Debug)]
struct IndexEntry {
    title: String,
    content: String,
    category: String,
}

impl SearchIndex {
    pub fn build(essays: &[Essay]) -> Self {
        let entries = essays
            .iter()
            .map(|e| IndexEntry {
                title: e.title.to_lowercase(),
                content: e.content.to_lowercase(),
                category: e.category.to_lowercase(),
            })
            .collect();
        Self { entries }
    }

    /// Whether the essay at collection position `idx` matches `term`.
    fn matches(&self, idx: usize, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        self.entries.get(idx).is_some_and(|entry| {
            entry.title.contains(term)
                || entry.content.contains(term)
                || entry.category.contains(term)
        })
    }

    /// Category filter, then search filter, over the whole collection.
    ///
    /// `essays` must be the slice the index was built from.
    pub fn apply(&self, essays: &[Essay], category: &CategoryKey, term: &str) -> Vec<Essay> {
        debug_assert_eq!(essays.len(), self.entries.len());
        essays
            .iter()
            .enumerate()
            .filter(|(_, essay)| category.matches(essay))
            .filter(|(idx, _)| self.matches(*idx, term))
            .map(|(_, essay)| essay.clone())
            .collect()
    }
}
