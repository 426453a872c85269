//! File-status cache invalidation.
//!
//! Some platforms cache file metadata (size, existence) between calls.
//! `std::fs` keeps no such cache, so [`invalidate`] has nothing to flush;
//! it exists so that locked reads and deletions issue the invalidation as
//! an explicit, observable event rather than relying on implicit global
//! cache behaviour.

use std::path::Path;

use log::trace;

/// Drop any cached status information for `path`.
pub fn invalidate(path: impl AsRef<Path>) {
    trace!("invalidate status cache: {}", path.as_ref().display());
}
