//! Error types for Grist operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Grist crates. Uses `thiserror` for derive macros.
//!
//! Best-effort operations in `grist-fs` never surface these errors; they
//! report through `bool`/`usize` returns instead. The strict variants and the
//! read/enumeration entry points return them directly.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Grist operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific path.
    #[error("I/O error at {}: {source}", path.display())]
    IoPath {
        /// Path the failing operation targeted.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Target does not exist or is not the expected type.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unknown charset label or unencodable target charset.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed caller input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Wrap an I/O error without path context.
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(err)
    }

    /// Wrap an I/O error together with the path it concerns.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoPath {
            path: path.as_ref().to_path_buf(),
            source: err,
        }
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an encoding error.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Returns true for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true for either I/O variant.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::IoPath { .. })
    }
}

/// Result type alias using Grist's Error type.
pub type Result<T> = std::result::Result<T, Error>;
