//! Scoped advisory locks.
//!
//! A [`LockGuard`] holds an `fs2` advisory lock on an open file and
//! releases it when dropped, so every exit path of the locked section
//! unlocks, including early returns through `?`.

use std::fs::File;
use std::io;
use std::path::Path;

use fs2::FileExt;
use log::debug;

/// Advisory lock held on a borrowed file handle.
pub(crate) struct LockGuard<'a> {
    file: &'a File,
    path: &'a Path,
}

impl<'a> LockGuard<'a> {
    /// Block until a shared lock is held.
    pub(crate) fn shared(file: &'a File, path: &'a Path) -> io::Result<Self> {
        FileExt::lock_shared(file)?;
        Ok(Self { file, path })
    }

    /// Block until an exclusive lock is held.
    pub(crate) fn exclusive(file: &'a File, path: &'a Path) -> io::Result<Self> {
        FileExt::lock_exclusive(file)?;
        Ok(Self { file, path })
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(self.file) {
            debug!("failed to unlock {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_guard_releases_on_drop() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lock.bin");
        let first = File::create(&path).unwrap();
        let second = File::open(&path).unwrap();

        {
            let _guard = LockGuard::exclusive(&first, &path).unwrap();
            assert!(FileExt::try_lock_shared(&second).is_err());
        }

        FileExt::try_lock_exclusive(&second).unwrap();
        FileExt::unlock(&second).unwrap();
    }

    #[test]
    fn test_shared_locks_coexist() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lock.bin");
        File::create(&path).unwrap();
        let first = File::open(&path).unwrap();
        let second = File::open(&path).unwrap();

        let _a = LockGuard::shared(&first, &path).unwrap();
        let _b = LockGuard::shared(&second, &path).unwrap();
    }
}
