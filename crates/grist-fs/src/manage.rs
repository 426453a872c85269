//! Directory creation, moves and deletion.
//!
//! These operations are best-effort: they return `bool` and log the
//! underlying failure at `debug` level. [`delete_dir_strict`] is the one
//! variant that propagates errors, since a partially deleted tree is the
//! case callers most often need to know about.

use std::fs;
use std::path::Path;

use grist_core::{Error, Result};
use log::debug;

use crate::paths::{exists, is_dir};
use crate::status;

/// Permission mode used when a directory is created implicitly.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Create a directory with the given permission mode.
///
/// Succeeds immediately if `path` is already a directory. After creation the
/// mode is applied again so the process umask does not narrow it. The mode
/// is ignored on non-Unix platforms.
///
/// Returns false if the directory could not be created.
pub fn make_dir(path: impl AsRef<Path>, mode: u32, recursive: bool) -> bool {
    let path = path.as_ref();
    if is_dir(path) {
        return true;
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }

    if let Err(e) = builder.create(path) {
        debug!("mkdir {} failed: {e}", path.display());
        return false;
    }

    apply_mode(path, mode);
    true
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(mode)) {
        debug!("chmod {:o} {} failed: {e}", mode, path.display());
    }
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: u32) {}

/// Move a file (or anything `rename` accepts) to `destination`.
///
/// The destination's parent directory is created with
/// [`DEFAULT_DIR_MODE`] if missing. An atomic rename is tried first; if it
/// fails (for example across filesystems), the source is copied and then
/// removed.
///
/// Returns false, without touching the filesystem, if `source` does not
/// exist; false if both strategies fail.
pub fn move_path(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> bool {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if !exists(source) {
        return false;
    }

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !exists(parent) && !make_dir(parent, DEFAULT_DIR_MODE, true) {
            return false;
        }
    }

    match fs::rename(source, destination) {
        Ok(()) => true,
        Err(e) => {
            debug!(
                "rename {} -> {} failed, falling back to copy: {e}",
                source.display(),
                destination.display()
            );
            match fs::copy(source, destination) {
                Ok(_) => {
                    delete_file(source);
                    true
                }
                Err(e) => {
                    debug!(
                        "copy {} -> {} failed: {e}",
                        source.display(),
                        destination.display()
                    );
                    false
                }
            }
        }
    }
}

/// Rename a directory to `destination`.
///
/// With `overwrite`, an existing destination directory is deleted first.
/// Unlike [`move_path`] there is no copy fallback: the rename either
/// succeeds atomically or the call returns false.
pub fn move_dir(source: impl AsRef<Path>, destination: impl AsRef<Path>, overwrite: bool) -> bool {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if overwrite && is_dir(destination) && !delete_dir(destination, false) {
        return false;
    }

    match fs::rename(source, destination) {
        Ok(()) => true,
        Err(e) => {
            debug!(
                "rename {} -> {} failed: {e}",
                source.display(),
                destination.display()
            );
            false
        }
    }
}

/// Recursively delete the contents of `directory`, then the directory
/// itself unless `preserve` is set.
///
/// Symbolic links are removed as entries, never followed. Individual
/// removal failures are logged and skipped; the result is true whenever the
/// traversal ran. Returns false if `directory` is not a directory or cannot
/// be listed.
pub fn delete_dir(directory: impl AsRef<Path>, preserve: bool) -> bool {
    let directory = directory.as_ref();
    if !is_dir(directory) {
        return false;
    }
    remove_tree(directory, preserve, false).is_ok()
}

/// Like [`delete_dir`], but stops at the first failed removal.
///
/// # Errors
///
/// - [`Error::NotFound`] if `directory` is not a directory
/// - [`Error::IoPath`] for the first listing or removal that fails
pub fn delete_dir_strict(directory: impl AsRef<Path>, preserve: bool) -> Result<()> {
    let directory = directory.as_ref();
    if !is_dir(directory) {
        return Err(Error::not_found(format!(
            "Directory does not exist at path {}",
            directory.display()
        )));
    }
    remove_tree(directory, preserve, true)
}

fn remove_tree(directory: &Path, preserve: bool, strict: bool) -> Result<()> {
    let entries = fs::read_dir(directory).map_err(|e| Error::io_with_path(e, directory))?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if strict => return Err(Error::io_with_path(e, directory)),
            Err(e) => {
                debug!("skipping unreadable entry in {}: {e}", directory.display());
                continue;
            }
        };
        let path = entry.path();

        // file_type() does not follow links, so a link to a directory is
        // removed as a plain entry.
        let is_real_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let outcome = if is_real_dir {
            remove_tree(&path, false, strict)
        } else {
            remove_entry(&path)
        };

        if let Err(e) = outcome {
            if strict {
                return Err(e);
            }
            debug!("delete {} failed: {e}", path.display());
        }
    }

    if !preserve {
        match fs::remove_dir(directory) {
            Ok(()) => status::invalidate(directory),
            Err(e) if strict => return Err(Error::io_with_path(e, directory)),
            Err(e) => debug!("rmdir {} failed: {e}", directory.display()),
        }
    }

    Ok(())
}

fn remove_entry(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io_with_path(e, path))?;
    status::invalidate(path);
    Ok(())
}

/// Delete every path in `paths`.
///
/// Every path is attempted even after a failure. Each successful deletion
/// invalidates the cached status of that path. Returns true only if every
/// deletion succeeded.
///
/// Pass a single path as a one-element array or use [`delete_file`].
pub fn delete<I, P>(paths: I) -> bool
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut success = true;
    for path in paths {
        success &= delete_file(path);
    }
    success
}

/// Delete a single file or link. Returns false on failure.
pub fn delete_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match remove_entry(path) {
        Ok(()) => true,
        Err(e) => {
            debug!("delete {} failed: {e}", path.display());
            false
        }
    }
}
