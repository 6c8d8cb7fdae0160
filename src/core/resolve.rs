//! Reference resolution against the document tree.

use std::path::{Path, PathBuf};

use crate::core::LinkKind;
use crate::utils::path::lexical_normalize;
use crate::utils::url::split_path_suffix;

/// A successfully resolved filesystem target.
///
/// `Fallback` marks targets recovered by the basename search under the root;
/// callers log those distinctly since the heuristic can pick the wrong file
/// when two subtrees share a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The reference resolved at its literal location.
    Direct(PathBuf),
    /// The literal location missed; a file with the same base name exists
    /// directly under the root.
    Fallback(PathBuf),
}

impl Resolution {
    /// The resolved filesystem target.
    #[inline]
    pub fn target(&self) -> &Path {
        match self {
            Self::Direct(p) | Self::Fallback(p) => p,
        }
    }

    /// Whether this target came from the basename fallback search.
    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Resolve a candidate reference to the filesystem target it points to.
///
/// The query/fragment tail is ignored here; only the path component takes
/// part in resolution. Root-relative paths (leading `/`) resolve under
/// `root`, everything else resolves against `document_dir`. The resolved
/// path is collapsed lexically before the existence probe, so `../` hops do
/// not require intermediate directories to exist.
///
/// With `fallback` enabled, a miss is retried as a file of the same base
/// name directly under `root`. Returns `None` when nothing exists (or when
/// the path component is empty, e.g. a bare `?query` reference).
pub fn resolve(
    candidate: &str,
    document_dir: &Path,
    root: &Path,
    fallback: bool,
) -> Option<Resolution> {
    let (path, _suffix) = split_path_suffix(candidate);
    if path.is_empty() {
        return None;
    }

    let joined = match LinkKind::parse(path) {
        // Classification upstream never lets these through; resolving them
        // is meaningless either way.
        LinkKind::External(_) | LinkKind::Fragment(_) => return None,
        LinkKind::SiteRoot(p) => root.join(p.trim_start_matches('/')),
        LinkKind::FileRelative(p) => document_dir.join(p),
    };

    // `exists()` swallows filesystem errors (a path component that is a
    // regular file, permission problems) and reports false; a data-quality
    // issue in the HTML must not abort the run.
    let target = lexical_normalize(&joined);
    if target.exists() {
        return Some(Resolution::Direct(target));
    }

    if fallback {
        let name = Path::new(path).file_name()?;
        let rescue = root.join(name);
        if rescue.is_file() {
            return Some(Resolution::Fallback(rescue));
        }
    }

    None
}
