use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Reasons the essay collection could not be loaded.
///
/// Every variant is reported to the reader the same way: an inline
/// "data unavailable" message in place of the listing. The variants exist
/// for logs.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No data file at the resolved path.
    #[error("Essay data not found at {}", .0.display())]
    Missing(PathBuf),

    /// The data file exists but could not be read.
    #[error("Failed to read essay data: {0}")]
    Io(#[from] std::io::Error),

    /// The data file is not a JSON array of essay records.
    #[error("Invalid essay data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share an id.
    #[error("Duplicate essay id {0} in essay data")]
    DuplicateId(i64),

    /// Data file exceeds the maximum accepted size.
    #[error("Essay data too large: {0} bytes")]
    TooLarge(u64),
}

// ============================================================================
// Records
// ============================================================================

/// One essay entry.
///
/// Deserialized from the camelCase JSON produced by the collection export.
/// String fields are `Arc<str>` so filtered lists and view models share the
/// loaded text instead of copying it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Essay {
    pub id: i64,
    pub title: Arc<str>,
    pub category: Arc<str>,
    pub category_id: Arc<str>,
    pub category_color: Arc<str>,
    pub content: Arc<str>,
    pub word_count: u64,
    pub reading_time: u64,
    pub url: Arc<str>,
}

/// A classification derived from the loaded records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Stable key (`categoryId`).
    pub id: Arc<str>,
    /// Display label (`category`).
    pub label: Arc<str>,
    /// Display color, CSS-style `#rrggbb`.
    pub color: Arc<str>,
}

impl Category {
    /// Distinct categories in first-appearance order.
    pub fn collect(essays: &[Essay]) -> Vec<Category> {
        let mut out: Vec<Category> = Vec::new();
        for essay in essays {
            if out.iter().any(|c| c.id == essay.category_id) {
                continue;
            }
            out.push(Category {
                id: Arc::clone(&essay.category_id),
                label: Arc::clone(&essay.category),
                color: Arc::clone(&essay.category_color),
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn essay(id: i64, category_id: &str, category: &str) -> Essay {
        Essay {
            id,
            title: Arc::from(format!("Essay {id}")),
            category: Arc::from(category),
            category_id: Arc::from(category_id),
            category_color: Arc::from("#112233"),
            content: Arc::from("body"),
            word_count: 100,
            reading_time: 1,
            url: Arc::from("https://example.com"),
        }
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = r##"{
            "id": 7,
            "title": "How to Start a Startup",
            "category": "Startups",
            "categoryId": "startups",
            "categoryColor": "#f97316",
            "content": "You need three things.",
            "wordCount": 8200,
            "readingTime": 33,
            "url": "https://example.com/start.html"
        }"##;
        let essay: Essay = serde_json::from_str(json).unwrap();
        assert_eq!(essay.id, 7);
        assert_eq!(&*essay.category_id, "startups");
        assert_eq!(&*essay.category_color, "#f97316");
        assert_eq!(essay.word_count, 8200);
        assert_eq!(essay.reading_time, 33);
    }

    #[test]
    fn test_deserialize_missing_field_fails() {
        let json = r#"{"id": 1, "title": "No body"}"#;
        assert!(serde_json::from_str::<Essay>(json).is_err());
    }

    #[test]
    fn test_categories_first_appearance_order() {
        let essays = vec![
            essay(1, "startups", "Startups"),
            essay(2, "writing", "Writing"),
            essay(3, "startups", "Startups"),
            essay(4, "lisp", "Lisp"),
        ];
        let ids: Vec<String> = Category::collect(&essays)
            .iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["startups", "writing", "lisp"]);
    }

    #[test]
    fn test_categories_empty() {
        assert!(Category::collect(&[]).is_empty());
    }
}
