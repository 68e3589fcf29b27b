use thiserror::Error;
use url::Url;

/// Why a source link will not be handed to the system browser.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
}

/// Validate an essay's source link before `open::that` receives it.
///
/// Only absolute `http`/`https` URLs with a host pass. Anything else
/// (`file://`, `javascript:`, bare paths) could launch an arbitrary handler.
///
/// ```
/// use quire::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://paulgraham.com/ds.html").is_ok());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(validate_url_for_open("https://example.com/essay.html").is_ok());
        assert!(validate_url_for_open("http://example.org").is_ok());
        assert!(validate_url_for_open("  https://example.com/padded  ").is_ok());
    }

    #[test]
    fn test_invalid_schemes() {
        assert!(matches!(
            validate_url_for_open("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(validate_url_for_open("javascript:alert(1)").is_err());
        assert!(validate_url_for_open("ftp://example.com").is_err());
    }

    #[test]
    fn test_relative_path_rejected() {
        assert!(matches!(
            validate_url_for_open("/essays/ds.html"),
            Err(UrlValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(validate_url_for_open("").is_err());
    }
}
