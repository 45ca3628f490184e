//! On-disk locations for downloaded external images.
//!
//! Cache keys come from parsed file contents, so they are validated
//! before being joined onto the cache directory.

use std::path::{Component, Path, PathBuf};

/// `~/.cache/romprops` (or the platform equivalent).
pub fn cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("romprops"))
}

/// Resolve `key` under the user cache directory.
pub fn cache_file_path(key: &str) -> Option<PathBuf> {
    cache_path_in(&cache_dir()?, key)
}

/// Resolve `key` under `base`. Returns `None` for empty keys, absolute
/// paths, `..` components, drive prefixes, and backslashes.
pub fn cache_path_in(base: &Path, key: &str) -> Option<PathBuf> {
    if key.is_empty() || key.contains('\\') || key.contains(':') {
        return None;
    }
    let rel = Path::new(key);
    if rel.is_absolute() || key.starts_with('/') {
        return None;
    }
    if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(base.join(rel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_key() {
        let base = Path::new("/tmp/cache");
        assert_eq!(
            cache_path_in(base, "00000001-00000002.png"),
            Some(PathBuf::from("/tmp/cache/00000001-00000002.png"))
        );
        assert_eq!(
            cache_path_in(base, "amiibo/00000001-00000002.png"),
            Some(PathBuf::from("/tmp/cache/amiibo/00000001-00000002.png"))
        );
    }

    #[test]
    fn test_rejects_escapes() {
        let base = Path::new("/tmp/cache");
        assert_eq!(cache_path_in(base, ""), None);
        assert_eq!(cache_path_in(base, "/etc/passwd"), None);
        assert_eq!(cache_path_in(base, "../secret.png"), None);
        assert_eq!(cache_path_in(base, "a/../../b.png"), None);
        assert_eq!(cache_path_in(base, "./a.png"), None);
        assert_eq!(cache_path_in(base, "a\\b.png"), None);
        assert_eq!(cache_path_in(base, "C:evil.png"), None);
    }
}
