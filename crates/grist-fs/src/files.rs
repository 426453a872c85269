//! Whole-file reads, writes and appends.
//!
//! Each operation optionally runs under an advisory lock: shared for reads,
//! exclusive for writes and appends. The lock is held only for the duration
//! of the call and released on every exit path.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use grist_core::{Error, Result};
use log::debug;

use crate::lock::LockGuard;
use crate::paths::is_file;
use crate::status;

/// Whether a read takes a shared advisory lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Plain read, no lock.
    #[default]
    Unlocked,
    /// Read under a shared lock.
    Locked,
}

impl From<bool> for ReadMode {
    fn from(locked: bool) -> Self {
        if locked { Self::Locked } else { Self::Unlocked }
    }
}

/// Whether a write or append takes an exclusive advisory lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Plain write, no lock.
    #[default]
    Unlocked,
    /// Write under an exclusive lock.
    Locked,
}

impl From<bool> for WriteMode {
    fn from(locked: bool) -> Self {
        if locked { Self::Locked } else { Self::Unlocked }
    }
}

/// Read the full contents of a regular file.
///
/// With [`ReadMode::Locked`], an un-openable or un-lockable handle yields
/// empty bytes instead of an error. Use [`read_file_strict`] to get the
/// error instead.
///
/// # Errors
///
/// - [`Error::NotFound`] if `path` is not a regular file
/// - [`Error::IoPath`] if the underlying read fails
pub fn read_file(path: impl AsRef<Path>, mode: ReadMode) -> Result<Vec<u8>> {
    read_impl(path.as_ref(), mode, false)
}

/// Like [`read_file`], but a locked read that cannot open or lock the
/// handle fails with [`Error::IoPath`].
pub fn read_file_strict(path: impl AsRef<Path>, mode: ReadMode) -> Result<Vec<u8>> {
    read_impl(path.as_ref(), mode, true)
}

/// Read a file and decode it as UTF-8, replacing invalid sequences.
pub fn read_to_string(path: impl AsRef<Path>, mode: ReadMode) -> Result<String> {
    let bytes = read_file(path, mode)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_impl(path: &Path, mode: ReadMode, strict: bool) -> Result<Vec<u8>> {
    if !is_file(path) {
        return Err(Error::not_found(format!(
            "File does not exist at path {}",
            path.display()
        )));
    }

    match mode {
        ReadMode::Unlocked => fs::read(path).map_err(|e| Error::io_with_path(e, path)),
        ReadMode::Locked => shared_read(path, strict),
    }
}

fn shared_read(path: &Path, strict: bool) -> Result<Vec<u8>> {
    read_opened(File::open(path), path, strict)
}

/// Lock and read an already-opened file; an open or lock failure yields
/// empty contents unless `strict`.
fn read_opened(opened: io::Result<File>, path: &Path, strict: bool) -> Result<Vec<u8>> {
    let file = match opened {
        Ok(file) => file,
        Err(e) if strict => return Err(Error::io_with_path(e, path)),
        Err(e) => {
            debug!("locked read could not open {}: {e}", path.display());
            return Ok(Vec::new());
        }
    };

    let _guard = match LockGuard::shared(&file, path) {
        Ok(guard) => guard,
        Err(e) if strict => return Err(Error::io_with_path(e, path)),
        Err(e) => {
            debug!("locked read could not lock {}: {e}", path.display());
            return Ok(Vec::new());
        }
    };

    status::invalidate(path);

    let mut contents = Vec::new();
    let mut handle = &file;
    handle
        .read_to_end(&mut contents)
        .map_err(|e| Error::io_with_path(e, path))?;

    Ok(contents)
}

/// Write `contents` to `path`, replacing any existing content.
///
/// The file is created if absent. With [`WriteMode::Locked`] the file is
/// truncated only after the exclusive lock is held, so a concurrent locked
/// reader sees either the old or the new contents in full.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`Error::IoPath`] if opening, locking or writing fails.
pub fn write_file(path: impl AsRef<Path>, contents: &[u8], mode: WriteMode) -> Result<usize> {
    let path = path.as_ref();
    match mode {
        WriteMode::Unlocked => {
            fs::write(path, contents).map_err(|e| Error::io_with_path(e, path))?;
        }
        WriteMode::Locked => {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(path)
                .map_err(|e| Error::io_with_path(e, path))?;
            let _guard =
                LockGuard::exclusive(&file, path).map_err(|e| Error::io_with_path(e, path))?;

            file.set_len(0).map_err(|e| Error::io_with_path(e, path))?;
            let mut handle = &file;
            handle
                .write_all(contents)
                .map_err(|e| Error::io_with_path(e, path))?;
        }
    }
    Ok(contents.len())
}

/// Append `contents` to `path`, creating the file if absent.
///
/// Returns the number of bytes written, or `0` if anything failed. Use
/// [`append_file_strict`] to get the error instead.
pub fn append_file(path: impl AsRef<Path>, contents: &[u8], mode: WriteMode) -> usize {
    let path = path.as_ref();
    match append_file_strict(path, contents, mode) {
        Ok(written) => written,
        Err(e) => {
            debug!("append to {} failed: {e}", path.display());
            0
        }
    }
}

/// Append `contents` to `path`, creating the file if absent.
///
/// # Errors
///
/// Returns [`Error::IoPath`] if opening, locking or writing fails.
pub fn append_file_strict(
    path: impl AsRef<Path>,
    contents: &[u8],
    mode: WriteMode,
) -> Result<usize> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| Error::io_with_path(e, path))?;

    let _guard = match mode {
        WriteMode::Locked => {
            Some(LockGuard::exclusive(&file, path).map_err(|e| Error::io_with_path(e, path))?)
        }
        WriteMode::Unlocked => None,
    };

    let mut handle = &file;
    handle
        .write_all(contents)
        .map_err(|e| Error::io_with_path(e, path))?;
    Ok(contents.len())
}
