//! Extension-filtered directory listing.
//!
//! [`list_files`] returns a lazy iterator over every non-directory entry
//! whose extension is in an [`ExtensionSet`]. Traversal is pre-order and
//! sorted by file name within each directory, so results are stable across
//! runs.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use grist_core::{Error, Result};
use walkdir::WalkDir;

/// Set of lowercase, dot-stripped file extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: HashSet<String>,
}

impl ExtensionSet {
    /// Build a set from individual extensions (`"txt"`, `".MD"`, ...).
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extensions.into_iter().collect()
    }

    /// Build a set from a comma-separated list, e.g. `"php,html,.js"`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    /// Returns true if `extension` is in the set (case-insensitive, leading
    /// dots ignored).
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(&normalize(extension))
    }

    /// Returns true if the extension of `path`'s file name is in the set.
    ///
    /// The extension is everything after the last `.` of the file name, so
    /// `.bashrc` has extension `bashrc` and `Makefile` has none. Names that
    /// are not valid UTF-8 are compared lossily.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };
        let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        self.extensions.contains(&extension.to_lowercase())
    }

    /// Number of distinct extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}

impl<S: AsRef<str>> FromIterator<S> for ExtensionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            extensions: iter.into_iter().map(|s| normalize(s.as_ref())).collect(),
        }
    }
}

impl From<&str> for ExtensionSet {
    fn from(list: &str) -> Self {
        Self::parse(list)
    }
}

impl From<&[&str]> for ExtensionSet {
    fn from(extensions: &[&str]) -> Self {
        Self::new(extensions)
    }
}

impl<const N: usize> From<[&str; N]> for ExtensionSet {
    fn from(extensions: [&str; N]) -> Self {
        Self::new(extensions)
    }
}

impl From<Vec<String>> for ExtensionSet {
    fn from(extensions: Vec<String>) -> Self {
        Self::new(extensions)
    }
}

/// Options for [`list_files`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Maximum depth of returned files when recursive; `0` means unbounded.
    /// Files directly inside the listed directory have depth 1.
    pub max_depth: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            max_depth: 0,
        }
    }
}

impl ListOptions {
    /// Only list the directory's immediate entries.
    pub fn flat() -> Self {
        Self {
            recursive: false,
            max_depth: 0,
        }
    }

    /// Set the recursion flag.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the maximum depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    fn walk_depth(&self) -> usize {
        match (self.recursive, self.max_depth) {
            (false, _) => 1,
            (true, 0) => usize::MAX,
            (true, depth) => depth,
        }
    }
}

/// Lazy iterator returned by [`list_files`].
///
/// Yields paths in the same form as the listed directory: a relative
/// directory yields relative paths. An unreadable subdirectory yields an
/// [`Error::IoPath`] item and traversal continues past it.
pub struct ListFiles {
    inner: walkdir::IntoIter,
    extensions: ExtensionSet,
}

impl Iterator for ListFiles {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    return Some(Err(Error::io_with_path(io::Error::from(err), path)));
                }
            };

            let is_dir = entry.file_type().is_dir()
                || (entry.path_is_symlink() && entry.path().is_dir());
            if is_dir {
                continue;
            }

            if self.extensions.matches(entry.path()) {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

/// List files under `directory` whose extension is in `extensions`.
///
/// Symbolic links to directories are neither descended into nor returned.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `directory` is not a readable directory.
///
/// # Example
///
/// ```no_run
/// use grist_fs::{ListOptions, list_files};
///
/// let sources: Vec<_> = list_files("src", ["rs"], ListOptions::default())?
///     .collect::<Result<_, _>>()?;
/// # Ok::<(), grist_core::Error>(())
/// ```
pub fn list_files(
    directory: impl AsRef<Path>,
    extensions: impl Into<ExtensionSet>,
    options: ListOptions,
) -> Result<ListFiles> {
    let directory = directory.as_ref();
    if !directory.is_dir() || fs::read_dir(directory).is_err() {
        return Err(Error::not_found(format!(
            "Directory is unreadable: {}",
            directory.display()
        )));
    }

    let inner = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(options.walk_depth())
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    Ok(ListFiles {
        inner,
        extensions: extensions.into(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::create_dir(root.join("b")).unwrap();
        fs::write(root.join("b").join("c.txt"), "c").unwrap();
        fs::write(root.join("b").join("d.md"), "d").unwrap();
        temp
    }

    fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<PathBuf> {
        files
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect()
    }

    #[test]
    fn test_list_files_recursive_preorder() {
        let temp = tree();
        let files: Vec<PathBuf> = list_files(temp.path(), ["txt"], ListOptions::default())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            relative(temp.path(), files),
            vec![PathBuf::from("a.txt"), Path::new("b").join("c.txt")]
        );
    }

    #[test]
    fn test_list_files_flat() {
        let temp = tree();
        let files: Vec<PathBuf> = list_files(temp.path(), "txt,md", ListOptions::flat())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(relative(temp.path(), files), vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn test_list_files_extension_normalization() {
        let temp = tree();
        fs::write(temp.path().join("UPPER.TXT"), "u").unwrap();

        let files: Vec<PathBuf> = list_files(temp.path(), [".TxT"], ListOptions::flat())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_list_files_max_depth_prunes() {
        let temp = tree();
        let deep = temp.path().join("b").join("e");
        fs::create_dir(&deep).unwrap();
        fs::write(deep.join("f.txt"), "f").unwrap();

        let depth_of = |depth: usize| {
            list_files(
                temp.path(),
                ["txt"],
                ListOptions::default().with_max_depth(depth),
            )
            .unwrap()
            .count()
        };

        assert_eq!(depth_of(1), 1);
        assert_eq!(depth_of(2), 2);
        assert_eq!(depth_of(0), 3);
    }

    #[test]
    fn test_list_files_relative_form_preserved() {
        let temp = tree();
        let files: Vec<PathBuf> = list_files(temp.path().join("b"), ["md"], ListOptions::flat())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(files, vec![temp.path().join("b").join("d.md")]);
    }

    #[test]
    fn test_list_files_is_restartable() {
        let temp = tree();
        let first = list_files(temp.path(), ["txt"], ListOptions::default())
            .unwrap()
            .count();
        let second = list_files(temp.path(), ["txt"], ListOptions::default())
            .unwrap()
            .count();

        assert_eq!(first, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_files_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = list_files(temp.path().join("missing"), ["txt"], ListOptions::default())
            .err()
            .unwrap();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_list_files_on_file_is_not_found() {
        let temp = tree();
        let result = list_files(temp.path().join("a.txt"), ["txt"], ListOptions::default());

        assert!(result.err().unwrap().is_not_found());
    }

    #[test]
    fn test_extension_set_parse() {
        let set = ExtensionSet::parse("php, .HTML,js,,");
        assert_eq!(set.len(), 3);
        assert!(set.contains("html"));
        assert!(set.contains(".PHP"));
        assert!(!set.contains("css"));
    }

    #[test]
    fn test_extension_set_matches_file_names() {
        let set = ExtensionSet::new(["bashrc", "gz"]);
        assert!(set.matches(Path::new(".bashrc")));
        assert!(set.matches(Path::new("archive.tar.GZ")));
        assert!(!set.matches(Path::new("Makefile")));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_files_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let latin1 = temp.path().join(OsStr::from_bytes(b"caf\xe9.txt"));
        fs::write(&latin1, "x").unwrap();
        fs::write(temp.path().join("ok.txt"), "x").unwrap();

        let files: Vec<PathBuf> = list_files(temp.path(), ["txt"], ListOptions::default())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.contains(&latin1));
        assert!(ExtensionSet::new(["txt"]).matches(&latin1));
    }

    #[test]
    fn test_empty_extension_set_matches_nothing() {
        let temp = tree();
        let set = ExtensionSet::default();
        assert!(set.is_empty());

        let count = list_files(temp.path(), set, ListOptions::default())
            .unwrap()
            .count();
        assert_eq!(count, 0);
    }
}
