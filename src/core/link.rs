//! Link classification utilities.

use crate::utils::url::is_external_link;

/// Prefixes that mark a reference as non-local or non-rewritable.
pub const SKIP_PREFIXES: [&str; 8] = [
    "http://",
    "https://",
    "//",
    "mailto:",
    "tel:",
    "javascript:",
    "data:",
    "#",
];

/// Placeholder value left behind by templating; never a real target.
const PLACEHOLDER_URL: &str = "%url%";

/// Marker substring for pages that intentionally link out of the tree.
const EXTERNAL_MARKER: &str = "external.html";

/// Syntactic classification of links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// External link with URL scheme (https://, mailto:, tel:, etc.)
    External(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Root-relative path (/about, /assets/logo.png).
    SiteRoot(&'a str),
    /// Document-relative path (./image.png, ../other, img/a.png).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }
}

/// Result of classifying a raw attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefClass<'a> {
    /// Leave the value untouched (external, anchor, data URI, malformed, ...).
    Skip,
    /// A local filesystem reference, trimmed of surrounding whitespace.
    Candidate(&'a str),
}

/// Decide whether a raw attribute value is a local filesystem reference.
///
/// Pure function: anything that is not clearly a local reference is `Skip`,
/// so a wrong answer can only ever mean "left an attribute alone".
pub fn classify(value: &str) -> RefClass<'_> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return RefClass::Skip;
    }

    if SKIP_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
        return RefClass::Skip;
    }

    // Templating placeholders and intentional out-of-tree links.
    if trimmed == PLACEHOLDER_URL || trimmed.contains(EXTERNAL_MARKER) {
        return RefClass::Skip;
    }

    // Unescaped quote artifacts from malformed source markup. Skipped rather
    // than sanitized; the walker logs these at debug level.
    if trimmed.contains("\\\"") {
        return RefClass::Skip;
    }

    // Catch-all for scheme'd URLs that slipped past the prefix check
    // (`ftp://...`, `file:...`, oddly cased schemes). A successful absolute
    // parse means the value carries a scheme or network location.
    if url::Url::parse(trimmed).is_ok() {
        return RefClass::Skip;
    }

    RefClass::Candidate(trimmed)
}
