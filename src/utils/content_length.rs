//! Declared size extraction.
//!
//! A missing or malformed `Content-Length` header is a normal outcome: the
//! transfer simply runs without a known total.

use reqwest::header::{HeaderMap, CONTENT_LENGTH};

/// Extract the declared size from response headers.
///
/// # Returns
///
/// The `Content-Length` value as `Option<u64>`, `None` if the header is
/// missing or is not a valid unsigned integer.
///
/// # Example
///
/// ```rust
/// use asyncdl::utils::parse_content_length;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_LENGTH, HeaderValue::from_static("2048"));
/// assert_eq!(parse_content_length(&headers), Some(2048));
/// ```
pub fn parse_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}
