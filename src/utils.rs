//! Utility functions and helpers

use crate::error::{CurlyError, Result};
use url::Url;

/// Parse a URL, defaulting the scheme to `http://` when none is given,
/// so `example.com/path` is accepted the way curl accepts it.
pub fn absolute_url(input: &str) -> Result<Url> {
    if input.is_empty() {
        return Err(CurlyError::InvalidUrl("empty URL".to_string()));
    }

    let url_str = if input.contains("://") {
        input.to_string()
    } else {
        format!("http://{}", input)
    };

    Url::parse(&url_str)
        .map_err(|e| CurlyError::InvalidUrl(format!("invalid URL '{}': {}", input, e)))
}

/// Derive a local file name from the last path segment of a URL.
pub fn file_name_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("download")
        .to_string()
}
