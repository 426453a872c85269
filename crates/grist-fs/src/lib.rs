//! Grist FS — filesystem helpers.
//!
//! Every function is a stateless, synchronous call against the local
//! filesystem. Cross-process coordination is limited to OS advisory locks
//! taken by the locked read/write modes.
//!
//! # Modules
//!
//! - [`paths`]: Existence and type predicates
//! - [`files`]: Whole-file reads, writes and appends
//! - [`manage`]: Directory creation, moves and deletion
//! - [`walk`]: Extension-filtered directory listing
//! - [`status`]: File-status cache invalidation hook

#![doc = include_str!("../README.md")]

pub mod files;
mod lock;
pub mod manage;
pub mod paths;
pub mod status;
pub mod walk;

pub use files::{
    ReadMode, WriteMode, append_file, append_file_strict, read_file, read_file_strict,
    read_to_string, write_file,
};
pub use manage::{
    DEFAULT_DIR_MODE, delete, delete_dir, delete_dir_strict, delete_file, make_dir, move_dir,
    move_path,
};
pub use paths::{exists, is_dir, is_file};
pub use status::invalidate;
pub use walk::{ExtensionSet, ListFiles, ListOptions, list_files};

pub use grist_core::{Error, Result};
