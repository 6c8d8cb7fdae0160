//! Path normalization utilities.
//!
//! Provides consistent path handling across the codebase:
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `lexical_normalize` - collapse `.`/`..` without touching the filesystem
//! - `relative_from` - relative path between two absolute paths
//! - `to_forward_slashes` - separator form required inside HTML attributes

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Collapse `.` and `..` components without requiring the path to exist.
///
/// `..` at the root is dropped rather than kept, so the result never climbs
/// above the filesystem root.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                // A `..` after a normal component pops it; after the root
                // (or nothing) it is dropped.
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                } else if !matches!(
                    components.last(),
                    Some(Component::RootDir | Component::Prefix(_))
                ) {
                    components.push(component);
                }
            }
            Component::CurDir => {}
            c => components.push(c),
        }
    }
    components.iter().collect()
}

/// Compute the relative path from `base` to `target`.
///
/// Both paths must be absolute. Unlike `Path::strip_prefix`, the result may
/// climb with `..` components when `target` is not a descendant of `base`.
pub fn relative_from(target: &Path, base: &Path) -> PathBuf {
    let target = lexical_normalize(target);
    let base = lexical_normalize(base);

    let mut target_parts = target.components().peekable();
    let mut base_parts = base.components().peekable();

    // Skip the shared prefix.
    while let (Some(t), Some(b)) = (target_parts.peek(), base_parts.peek()) {
        if t != b {
            break;
        }
        target_parts.next();
        base_parts.next();
    }

    let mut relative = PathBuf::new();
    for _ in base_parts {
        relative.push("..");
    }
    for part in target_parts {
        relative.push(part);
    }
    relative
}

/// Render a path with forward slashes regardless of the host separator.
///
/// HTML attribute values always use `/`, so rewritten references must not
/// leak `\` on Windows.
#[inline]
pub fn to_forward_slashes(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        raw.into_owned()
    } else {
        raw.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_lexical_normalize_collapses_dots() {
        assert_eq!(
            lexical_normalize(Path::new("/root/sub/../assets/./logo.png")),
            PathBuf::from("/root/assets/logo.png")
        );
        assert_eq!(
            lexical_normalize(Path::new("/root/./a/b/../../c")),
            PathBuf::from("/root/c")
        );
    }

    #[test]
    fn test_lexical_normalize_stops_at_root() {
        assert_eq!(
            lexical_normalize(Path::new("/root/../../etc/passwd")),
            PathBuf::from("/etc/passwd")
        );
        assert_eq!(lexical_normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_relative_from_descendant() {
        assert_eq!(
            relative_from(Path::new("/root/assets/logo.png"), Path::new("/root")),
            PathBuf::from("assets/logo.png")
        );
    }

    #[test]
    fn test_relative_from_sibling() {
        assert_eq!(
            relative_from(Path::new("/root/guide.html"), Path::new("/root/docs")),
            PathBuf::from("../guide.html")
        );
    }

    #[test]
    fn test_relative_from_same_dir() {
        assert_eq!(
            relative_from(Path::new("/root/a.html"), Path::new("/root")),
            PathBuf::from("a.html")
        );
    }

    #[test]
    fn test_to_forward_slashes() {
        assert_eq!(
            to_forward_slashes(Path::new("assets/img/logo.png")),
            "assets/img/logo.png"
        );
    }
}
