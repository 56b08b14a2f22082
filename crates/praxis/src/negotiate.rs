//! Content-type negotiation.
//!
//! Negotiation only runs when the matched operation declares an input
//! contract. The comparison is deliberately narrow: the media type before
//! any `;` parameters must equal the declared type exactly. Charset and
//! other parameters are ignored, wildcards are not honored.

/// Returns `true` when the request content type satisfies the declared one.
///
/// A request without a content type never satisfies a declared contract.
#[must_use]
pub fn content_type_matches(request: Option<&str>, declared: &str) -> bool {
    let Some(request) = request else {
        return false;
    };
    media_type(request) == media_type(declared)
}

/// Strips `;`-separated parameters and surrounding whitespace.
fn media_type(value: &str) -> &str {
    value.split(';').next().unwrap_or(value).trim()
}
