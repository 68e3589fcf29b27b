//! The essay collection: record types, where they come from, and how a
//! visible subset is derived from them.

mod filter;
mod source;
mod types;

pub use filter::{matches_search, normalize_query, CategoryKey, SearchIndex};
pub use source::{DataSource, JsonFileSource, StaticSource};
pub use types::{Category, Essay, SourceError};
