//! URL-shaped string utilities.
//!
//! References found in HTML attributes are URLs, not paths: they may carry a
//! query string and fragment, and external targets carry a scheme. These
//! helpers keep that parsing in one place.

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
///
/// # Examples
/// ```
/// use relink::utils::url::is_external_link;
/// assert!(is_external_link("https://example.com"));
/// assert!(is_external_link("mailto:user@example.com"));
/// assert!(!is_external_link("/about"));
/// assert!(!is_external_link("./file.txt"));
/// ```
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Split a reference into its path component and the `?query#fragment` tail.
///
/// The tail starts at the first `?` or `#` and is preserved verbatim so it
/// can be reattached unchanged after the path is rewritten.
///
/// # Examples
/// ```
/// use relink::utils::url::split_path_suffix;
/// assert_eq!(split_path_suffix("img/a.png?x=1#top"), ("img/a.png", "?x=1#top"));
/// assert_eq!(split_path_suffix("img/a.png#top"), ("img/a.png", "#top"));
/// assert_eq!(split_path_suffix("img/a.png"), ("img/a.png", ""));
/// assert_eq!(split_path_suffix("?page=2"), ("", "?page=2"));
/// ```
#[inline]
pub fn split_path_suffix(value: &str) -> (&str, &str) {
    match value.find(['?', '#']) {
        Some(pos) => value.split_at(pos),
        None => (value, ""),
    }
}
