//! Path resolution helpers.
//!
//! Pure string/path manipulation, no filesystem I/O: a resolved path may
//! point at a location that does not exist yet. Whether that matters is the
//! caller's concern.

use std::path::{Path, PathBuf};

/// Resolve a path-like setting against a base directory.
///
/// - `None` stays `None` (absence is preserved, not defaulted)
/// - absolute paths are returned unchanged
/// - relative paths are joined onto `base`
///
/// Idempotent: resolving an already-resolved path yields the same value.
pub fn resolve(path: Option<&Path>, base: &Path) -> Option<PathBuf> {
    path.map(|p| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            base.join(p)
        }
    })
}

/// Resolve a required path field in place.
pub fn resolve_in_place(path: &mut PathBuf, base: &Path) {
    if !path.is_absolute() {
        *path = base.join(&*path);
    }
}

/// Expand a leading `~` or `~/` to the user's home directory.
///
/// Paths without the shorthand pass through untouched.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        let home = user_home();
        if rest.is_empty() {
            return home;
        }
        if let Some(rest) = rest.strip_prefix('/') {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Make a path absolute, anchoring relative paths at the current working
/// directory. No symlink resolution and no existence check.
pub fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("/"))
            .join(path)
    }
}

fn user_home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_preserved() {
        assert_eq!(resolve(None, Path::new("/notes")), None);
    }

    #[test]
    fn test_absolute_path_unchanged() {
        let result = resolve(Some(Path::new("/elsewhere/daily")), Path::new("/notes"));
        assert_eq!(result, Some(PathBuf::from("/elsewhere/daily")));
    }

    #[test]
    fn test_relative_path_joined() {
        let result = resolve(Some(Path::new("daily")), Path::new("/notes"));
        assert_eq!(result, Some(PathBuf::from("/notes/daily")));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let base = Path::new("/notes");
        let once = resolve(Some(Path::new("img/attachments")), base).unwrap();
        let twice = resolve(Some(once.as_path()), base).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_expand_home_tilde() {
        let expanded = expand_home("~/zettelkasten");
        assert!(expanded.is_absolute());
        assert!(expanded.ends_with("zettelkasten"));
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_expand_home_passthrough() {
        assert_eq!(expand_home("/notes"), PathBuf::from("/notes"));
        // A mid-path tilde is not shorthand
        assert_eq!(expand_home("/a/~b"), PathBuf::from("/a/~b"));
    }

    #[test]
    fn test_absolutize_relative() {
        let result = absolutize(PathBuf::from("notes"));
        assert!(result.is_absolute());
        assert!(result.ends_with("notes"));
    }
}
