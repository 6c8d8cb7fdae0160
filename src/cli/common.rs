//! Common utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use crate::utils::path::to_forward_slashes;

/// Extensions treated as HTML documents (compared case-insensitively).
pub const HTML_EXTENSIONS: [&str; 3] = ["html", "htm", "xhtml"];

/// Collect all HTML files under `root`, lexicographically sorted.
///
/// Sorting keeps logs and reports reproducible across runs and platforms.
pub fn collect_html_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| has_html_extension(p))
        .collect();
    files.sort();
    files
}

/// Check whether a path carries one of the recognized HTML extensions.
fn has_html_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| HTML_EXTENSIONS.iter().any(|h| ext.eq_ignore_ascii_case(h)))
}

/// Root-relative display name for a document, forward slashes.
pub fn display_name(file: &Path, root: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    to_forward_slashes(rel)
}
