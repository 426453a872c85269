//! Existence and type predicates.
//!
//! None of these fail: anything that cannot be inspected is reported as
//! absent.

use std::path::Path;

/// Returns true if `path` resolves to any filesystem entry.
///
/// Symbolic links are followed, so a dangling link does not exist.
pub fn exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().try_exists().unwrap_or(false)
}

/// Returns true if `path` is a regular file (following links).
pub fn is_file(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

/// Returns true if `path` is a directory (following links).
pub fn is_dir(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_exists_file_and_dir() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        fs::write(&file, "a").unwrap();

        assert!(exists(&file));
        assert!(exists(temp.path()));
        assert!(!exists(temp.path().join("missing")));
    }

    #[test]
    fn test_type_predicates() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        fs::write(&file, "a").unwrap();

        assert!(is_file(&file));
        assert!(!is_dir(&file));
        assert!(is_dir(temp.path()));
        assert!(!is_file(temp.path()));
    }

    #[test]
    fn test_predicates_false_for_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        assert!(!is_file(&missing));
        assert!(!is_dir(&missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_does_not_exist() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("dangling");
        std::os::unix::fs::symlink(temp.path().join("target"), &link).unwrap();

        assert!(!exists(&link));
    }
}
