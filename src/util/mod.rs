//! Utility functions for common operations.
//!
//! - **Text processing**: card previews, Unicode-aware width truncation, and
//!   stripping of terminal control sequences from essay text
//! - **URL validation**: checks a source link before it is opened in the
//!   system browser
//!
//! # Examples
//!
//! ```
//! use quire::util::{display_width, format_thousands, truncate_to_width};
//!
//! assert_eq!(display_width("Hello"), 5);
//! assert_eq!(truncate_to_width("How to Start a Startup", 10), "How to ...");
//! assert_eq!(format_thousands(8200), "8,200");
//! ```

mod text;
mod url_validator;

pub use text::{
    display_width, format_thousands, preview, strip_control_chars, truncate_to_width, ELLIPSIS,
    PREVIEW_CHARS,
};
pub use url_validator::{validate_url_for_open, UrlValidationError};

/// Maximum search query length accepted from the search box.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
