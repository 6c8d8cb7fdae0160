//! Canonical string form for resolved references.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::path::{relative_from, to_forward_slashes};
use crate::utils::url::split_path_suffix;

/// Which directory the rewritten reference is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum RewriteMode {
    /// Emit paths relative to the root (the primary mode).
    #[default]
    #[serde(rename = "root")]
    #[value(name = "root")]
    RootRelative,
    /// Emit paths relative to the referencing document.
    #[serde(rename = "document")]
    #[value(name = "document")]
    DocumentRelative,
}

/// Convert a resolved, existing target back into the reference string that
/// should replace `original`.
///
/// Returns `None` when no rewrite is needed: the canonical form already
/// matches the original path component, or the target lies outside the root
/// (out-of-root targets are never valid rewrite material). The original
/// `?query#fragment` tail is reattached verbatim.
pub fn rewrite(
    original: &str,
    target: &Path,
    root: &Path,
    document_dir: &Path,
    mode: RewriteMode,
) -> Option<String> {
    let (path, suffix) = split_path_suffix(original);

    let relative = match mode {
        RewriteMode::RootRelative => target.strip_prefix(root).ok()?.to_path_buf(),
        RewriteMode::DocumentRelative => {
            // Containment still gates document-relative output: a target
            // outside the root must not be normalized into the tree.
            target.strip_prefix(root).ok()?;
            relative_from(target, document_dir)
        }
    };

    let rewritten = to_forward_slashes(&relative);
    if rewritten == path {
        return None;
    }

    Some(format!("{rewritten}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_root_relative() {
        let root = PathBuf::from("/site");
        let target = root.join("assets/logo.png");
        assert_eq!(
            rewrite("../assets/logo.png", &target, &root, &root.join("sub"), RewriteMode::RootRelative),
            Some("assets/logo.png".to_string())
        );
    }

    #[test]
    fn test_document_relative() {
        let root = PathBuf::from("/site");
        let target = root.join("guide.html");
        assert_eq!(
            rewrite("/docs/guide.html", &target, &root, &root.join("docs"), RewriteMode::DocumentRelative),
            Some("../guide.html".to_string())
        );
    }

    #[test]
    fn test_no_change_signalled() {
        let root = PathBuf::from("/site");
        let target = root.join("assets/logo.png");
        assert_eq!(
            rewrite("assets/logo.png", &target, &root, &root, RewriteMode::RootRelative),
            None
        );
    }

    #[test]
    fn test_suffix_reattached() {
        let root = PathBuf::from("/site");
        let target = root.join("img/a.png");
        assert_eq!(
            rewrite("../img/a.png?x=1#top", &target, &root, &root.join("sub"), RewriteMode::RootRelative),
            Some("img/a.png?x=1#top".to_string())
        );
    }

    #[test]
    fn test_out_of_root_refused() {
        let root = PathBuf::from("/site/docs");
        let target = PathBuf::from("/site/secret.txt");
        assert_eq!(
            rewrite("../secret.txt", &target, &root, &root, RewriteMode::RootRelative),
            None
        );
        assert_eq!(
            rewrite("../secret.txt", &target, &root, &root, RewriteMode::DocumentRelative),
            None
        );
    }

    #[test]
    fn test_no_change_with_suffix() {
        // Suffix differences never force a rewrite on their own; equality is
        // judged on the path component.
        let root = PathBuf::from("/site");
        let target = root.join("a.html");
        assert_eq!(
            rewrite("a.html?x=1", &target, &root, &root, RewriteMode::RootRelative),
            None
        );
    }
}
