//! Parsed-document walking and in-place attribute editing.
//!
//! Documents are parsed with `tl` and walked read-only in document order;
//! every change is applied afterwards by splicing the raw text at the
//! attribute value's span. The parse tree is never re-serialized, so all
//! markup outside rewritten attribute values survives byte-for-byte
//! (entities, whitespace, comments, doctype, inline script/style).

mod srcset;

use std::path::Path;

use crate::core::{RefClass, RewriteMode, classify, resolve, rewrite};
use crate::debug;

/// Attributes that can carry local resource references.
pub const URL_ATTRS: [&str; 5] = ["href", "src", "data-src", "poster", "srcset"];

/// One applied attribute change, for reporting.
#[derive(Debug, Clone)]
pub struct AttrChange {
    /// Attribute name as written in the source.
    pub attr: String,
    /// Previous reference (for `srcset`, the single entry url).
    pub old: String,
    /// Replacement reference.
    pub new: String,
    /// Whether the target came from the basename fallback search.
    pub via_fallback: bool,
}

/// A reference extracted for auditing: attribute name plus one url.
#[derive(Debug, Clone)]
pub struct ScannedRef {
    /// Attribute name as written in the source.
    pub attr: String,
    /// Reference value (`srcset` values are expanded per entry).
    pub value: String,
}

/// Resolution context for one document.
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    /// Normalized site root.
    pub root: &'a Path,
    /// Parent directory of the document being processed.
    pub document_dir: &'a Path,
    /// Anchor for rewritten references.
    pub mode: RewriteMode,
    /// Enable the basename rescue search under the root.
    pub fallback: bool,
}

/// Result of rewriting one document.
#[derive(Debug, Default)]
pub struct RewriteOutcome {
    /// New document text; `None` when nothing changed.
    pub html: Option<String>,
    /// Per-attribute change log, in document order.
    pub changes: Vec<AttrChange>,
}

/// A pending edit: replace `old` with `new` in attribute `attr`.
///
/// For `srcset` the values are the full attribute value; `changes` keeps the
/// per-entry records for the log.
struct PlannedEdit {
    attr: String,
    old: String,
    new: String,
    changes: Vec<AttrChange>,
}

/// Rewrite every candidate reference in `html`.
///
/// Returns the edited text together with the change log; when no attribute
/// changed the text is `None` and the input must be left untouched on disk.
pub fn rewrite_document(html: &str, ctx: &RewriteContext) -> RewriteOutcome {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        debug!("rewrite"; "parse failed, leaving document untouched");
        return RewriteOutcome::default();
    };

    let parser = dom.parser();
    let mut edits = Vec::new();
    for handle in dom.children() {
        collect_edits(*handle, parser, ctx, &mut edits);
    }

    if edits.is_empty() {
        return RewriteOutcome::default();
    }

    apply_edits(html, edits)
}

/// Extract every reference in the fixed attribute set, for auditing.
///
/// `srcset` values are expanded into one entry per url; descriptors are
/// dropped. Unparseable documents yield no references.
pub fn collect_references(html: &str) -> Vec<ScannedRef> {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        debug!("audit"; "parse failed, no references collected");
        return Vec::new();
    };

    let parser = dom.parser();
    let mut refs = Vec::new();
    for handle in dom.children() {
        scan_node(*handle, parser, &mut refs);
    }
    refs
}

/// Walk one node (pre-order) and plan edits for its URL attributes.
fn collect_edits(
    handle: tl::NodeHandle,
    parser: &tl::Parser,
    ctx: &RewriteContext,
    edits: &mut Vec<PlannedEdit>,
) {
    let Some(node) = handle.get(parser) else {
        return;
    };
    let tl::Node::Tag(tag) = node else {
        return;
    };

    for (name, value) in tag.attributes().iter() {
        let name: &str = name.as_ref();
        if !is_url_attr(name) {
            continue;
        }
        let Some(value) = value else {
            continue;
        };
        let value: &str = value.as_ref();

        if name.eq_ignore_ascii_case("srcset") {
            if let Some((new_value, changes)) = srcset::rewrite_srcset(value, ctx) {
                edits.push(PlannedEdit {
                    attr: name.to_string(),
                    old: value.to_string(),
                    new: new_value,
                    changes,
                });
            }
        } else if let Some((new_value, via_fallback)) = rewrite_value(value, ctx) {
            edits.push(PlannedEdit {
                attr: name.to_string(),
                old: value.to_string(),
                new: new_value.clone(),
                changes: vec![AttrChange {
                    attr: name.to_string(),
                    old: value.trim().to_string(),
                    new: new_value,
                    via_fallback,
                }],
            });
        }
    }

    for child in tag.children().top().iter() {
        collect_edits(*child, parser, ctx, edits);
    }
}

/// Walk one node (pre-order) and record its URL attribute values.
fn scan_node(handle: tl::NodeHandle, parser: &tl::Parser, refs: &mut Vec<ScannedRef>) {
    let Some(node) = handle.get(parser) else {
        return;
    };
    let tl::Node::Tag(tag) = node else {
        return;
    };

    for (name, value) in tag.attributes().iter() {
        let name: &str = name.as_ref();
        if !is_url_attr(name) {
            continue;
        }
        let Some(value) = value else {
            continue;
        };
        let value: &str = value.as_ref();

        if name.eq_ignore_ascii_case("srcset") {
            for url in srcset::entry_urls(value) {
                refs.push(ScannedRef {
                    attr: name.to_string(),
                    value: url.to_string(),
                });
            }
        } else {
            refs.push(ScannedRef {
                attr: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    for child in tag.children().top().iter() {
        scan_node(*child, parser, refs);
    }
}

/// Classify, resolve and rewrite a single reference value.
///
/// Returns the replacement string and whether the fallback search produced
/// the target. `None` means the value stays untouched (skipped, unresolved,
/// out of root, or already canonical).
pub(crate) fn rewrite_value(raw: &str, ctx: &RewriteContext) -> Option<(String, bool)> {
    let RefClass::Candidate(candidate) = classify(raw) else {
        if raw.contains("\\\"") {
            debug!("rewrite"; "skipping malformed value {:?}", raw);
        }
        return None;
    };

    let resolution = resolve(candidate, ctx.document_dir, ctx.root, ctx.fallback)?;
    let new_value = rewrite(
        candidate,
        resolution.target(),
        ctx.root,
        ctx.document_dir,
        ctx.mode,
    )?;
    Some((new_value, resolution.is_fallback()))
}

/// Apply planned edits to the raw text by replacing attribute value spans.
///
/// Every edit's span is located before any splicing, each span claimed at
/// most once, and the splice runs in text order — the parser's attribute
/// iteration order never influences the output. An edit whose span cannot
/// be located (pathological markup) is dropped rather than misapplied, and
/// its changes stay out of the log.
fn apply_edits(html: &str, edits: Vec<PlannedEdit>) -> RewriteOutcome {
    let mut located: Vec<(usize, usize, PlannedEdit)> = Vec::new();

    for edit in edits {
        let mut from = 0usize;
        let mut span = None;
        while let Some((start, end)) = find_attr_value_span(html, from, &edit.attr, &edit.old) {
            let claimed = located
                .iter()
                .any(|(s, e, _)| start < *e && *s < end);
            if claimed {
                from = end;
                continue;
            }
            span = Some((start, end));
            break;
        }
        match span {
            Some((start, end)) => located.push((start, end, edit)),
            None => {
                debug!("rewrite"; "could not locate {}=\"{}\" in source, skipping", edit.attr, edit.old);
            }
        }
    }

    located.sort_by_key(|(start, _, _)| *start);

    let mut out = String::with_capacity(html.len() + 64);
    let mut changes = Vec::new();
    let mut cursor = 0usize;
    for (start, end, edit) in located {
        out.push_str(&html[cursor..start]);
        out.push_str(&edit.new);
        cursor = end;
        changes.extend(edit.changes);
    }
    out.push_str(&html[cursor..]);

    if changes.is_empty() {
        return RewriteOutcome::default();
    }
    RewriteOutcome {
        html: Some(out),
        changes,
    }
}

/// Membership test against [`URL_ATTRS`], ASCII case-insensitive.
#[inline]
fn is_url_attr(name: &str) -> bool {
    URL_ATTRS.iter().any(|a| name.eq_ignore_ascii_case(a))
}

/// Locate the value span of `attr="old"` at or after `from`.
///
/// Honors double-quoted, single-quoted and unquoted values and returns the
/// span of the value only, so the author's quote style survives the edit.
fn find_attr_value_span(html: &str, from: usize, attr: &str, old: &str) -> Option<(usize, usize)> {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut i = from;

    while let Some(pos) = find_token_ci(bytes, i, attr.as_bytes()) {
        i = pos + attr.len();

        // The attribute token must not be the tail of a longer name
        // (`src` inside `data-src`) or sit inside another value.
        let boundary_ok = pos == 0
            || matches!(
                bytes[pos - 1],
                b' ' | b'\t' | b'\n' | b'\r' | b'"' | b'\''
            );
        if !boundary_ok {
            continue;
        }

        let mut j = i;
        while j < len && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= len || bytes[j] != b'=' {
            continue;
        }
        j += 1;
        while j < len && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= len {
            return None;
        }

        let (start, end) = match bytes[j] {
            quote @ (b'"' | b'\'') => {
                let start = j + 1;
                let end = start + html[start..].find(quote as char)?;
                (start, end)
            }
            _ => {
                let start = j;
                let end = html[start..]
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .map_or(len, |p| start + p);
                (start, end)
            }
        };

        if &html[start..end] == old {
            return Some((start, end));
        }
    }

    None
}

/// Case-insensitive byte search for `needle` in `haystack[from..]`.
fn find_token_ci(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= haystack.len() || needle.is_empty() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
        .map(|p| p + from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("assets/logo.png"), b"png").unwrap();
        fs::write(root.join("assets/logo@2x.png"), b"png").unwrap();
        fs::write(root.join("index.html"), b"<html></html>").unwrap();
        (dir, root)
    }

    fn ctx<'a>(root: &'a PathBuf, dir: &'a PathBuf) -> RewriteContext<'a> {
        RewriteContext {
            root,
            document_dir: dir,
            mode: RewriteMode::RootRelative,
            fallback: false,
        }
    }

    #[test]
    fn test_rewrite_document_basic() {
        let (_t, root) = fixture();
        let sub = root.join("sub");
        let html = r#"<html><body><img src="../assets/logo.png" alt="x"></body></html>"#;
        let outcome = rewrite_document(html, &ctx(&root, &sub));
        assert_eq!(
            outcome.html.as_deref(),
            Some(r#"<html><body><img src="assets/logo.png" alt="x"></body></html>"#)
        );
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].attr, "src");
        assert_eq!(outcome.changes[0].old, "../assets/logo.png");
        assert_eq!(outcome.changes[0].new, "assets/logo.png");
    }

    #[test]
    fn test_rewrite_document_no_change() {
        let (_t, root) = fixture();
        let html = concat!(
            r##"<a href="https://example.com">x</a>"##,
            r##"<a href="#top">y</a>"##,
            r#"<img src="assets/logo.png">"#,
        );
        let outcome = rewrite_document(html, &ctx(&root, &root.clone()));
        assert!(outcome.html.is_none());
        assert!(outcome.changes.is_empty());
    }

    #[test]
    fn test_rewrite_document_preserves_surrounding_markup() {
        let (_t, root) = fixture();
        let sub = root.join("sub");
        let html = "<!DOCTYPE html>\n<!-- keep -->\n<img   src='../assets/logo.png'>\n<script>var src=\"../assets/logo.png\";</script>\n";
        let outcome = rewrite_document(html, &ctx(&root, &sub));
        let rewritten = outcome.html.unwrap();
        assert!(rewritten.starts_with("<!DOCTYPE html>\n<!-- keep -->"));
        // Quote style preserved.
        assert!(rewritten.contains("src='assets/logo.png'"));
        // Inline script content untouched.
        assert!(rewritten.contains("var src=\"../assets/logo.png\";"));
    }

    #[test]
    fn test_rewrite_document_query_fragment() {
        let (_t, root) = fixture();
        let sub = root.join("sub");
        let html = r#"<img src="../assets/logo.png?x=1#top">"#;
        let outcome = rewrite_document(html, &ctx(&root, &sub));
        assert_eq!(
            outcome.html.as_deref(),
            Some(r#"<img src="assets/logo.png?x=1#top">"#)
        );
    }

    #[test]
    fn test_rewrite_document_srcset_partial() {
        let (_t, root) = fixture();
        let sub = root.join("sub");
        let html = r#"<img srcset="../assets/logo.png 1x, https://cdn.example.com/b.png 2x">"#;
        let outcome = rewrite_document(html, &ctx(&root, &sub));
        assert_eq!(
            outcome.html.as_deref(),
            Some(r#"<img srcset="assets/logo.png 1x, https://cdn.example.com/b.png 2x">"#)
        );
        assert_eq!(outcome.changes.len(), 1);
        assert!(!outcome.changes[0].via_fallback);
    }

    #[test]
    fn test_collect_references_expands_srcset() {
        let html = r#"<a href="a.html">x</a><img srcset="b.png 1x, c.png 2x" src="d.png">"#;
        let refs = collect_references(html);
        // Attribute iteration order within a tag is a parser detail; compare
        // as a sorted set.
        let mut values: Vec<&str> = refs.iter().map(|r| r.value.as_str()).collect();
        values.sort_unstable();
        assert_eq!(values, ["a.html", "b.png", "c.png", "d.png"]);
    }

    #[test]
    fn test_find_attr_value_span_boundaries() {
        let html = r#"<img data-src="a.png" src="a.png">"#;
        // Searching for `src` must not land inside `data-src`.
        let (start, end) = find_attr_value_span(html, 0, "src", "a.png").unwrap();
        assert_eq!(&html[start..end], "a.png");
        assert!(start > html.find("data-src").unwrap() + "data-src=\"a.png\"".len());
    }

    #[test]
    fn test_find_attr_value_span_unquoted() {
        let html = "<img src=a.png alt=x>";
        let (start, end) = find_attr_value_span(html, 0, "src", "a.png").unwrap();
        assert_eq!(&html[start..end], "a.png");
    }
}
