//! `srcset` micro-syntax handling.
//!
//! A `srcset` value is a comma-separated list of entries, each an image url
//! optionally followed by whitespace-separated descriptors (`1x`, `480w`).
//! Only the urls are candidates for rewriting; descriptors pass through
//! verbatim.

use super::{AttrChange, RewriteContext, rewrite_value};

/// Rewrite the urls inside a `srcset` value.
///
/// Returns the reassembled value and the per-entry change records, or `None`
/// when no entry changed — the attribute is then left untouched, so harmless
/// whitespace variation never produces a spurious diff.
pub(super) fn rewrite_srcset(
    value: &str,
    ctx: &RewriteContext,
) -> Option<(String, Vec<AttrChange>)> {
    let mut entries = Vec::new();
    let mut changes = Vec::new();

    for entry in value.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let mut tokens = entry.split_whitespace();
        let url = tokens.next()?;

        let rebuilt_url = match rewrite_value(url, ctx) {
            Some((new_url, via_fallback)) => {
                changes.push(AttrChange {
                    attr: "srcset".to_string(),
                    old: url.to_string(),
                    new: new_url.clone(),
                    via_fallback,
                });
                new_url
            }
            None => url.to_string(),
        };

        let mut rebuilt = rebuilt_url;
        for descriptor in tokens {
            rebuilt.push(' ');
            rebuilt.push_str(descriptor);
        }
        entries.push(rebuilt);
    }

    if changes.is_empty() {
        return None;
    }
    Some((entries.join(", "), changes))
}

/// The url token of every non-empty entry, in order.
pub(super) fn entry_urls(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .filter_map(|entry| entry.split_whitespace().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RewriteMode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_entry_urls() {
        let urls: Vec<&str> = entry_urls("a.png 1x, b.png 2x,, c.png").collect();
        assert_eq!(urls, ["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_rewrite_srcset_partial() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("assets/a.png"), b"png").unwrap();

        let sub = root.join("sub");
        let ctx = RewriteContext {
            root: &root,
            document_dir: &sub,
            mode: RewriteMode::RootRelative,
            fallback: false,
        };

        let (value, changes) =
            rewrite_srcset("../assets/a.png 1x, https://cdn.example.com/b.png 2x", &ctx).unwrap();
        assert_eq!(value, "assets/a.png 1x, https://cdn.example.com/b.png 2x");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old, "../assets/a.png");
        assert_eq!(changes[0].new, "assets/a.png");
    }

    #[test]
    fn test_rewrite_srcset_untouched() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let ctx = RewriteContext {
            root: &root,
            document_dir: &root,
            mode: RewriteMode::RootRelative,
            fallback: false,
        };
        // Nothing resolves; the oddly spaced value must not be reformatted.
        assert!(rewrite_srcset("x.png   1x,y.png 2x", &ctx).is_none());
    }
}
