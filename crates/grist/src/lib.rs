//! Grist — umbrella crate.
//!
//! Re-exports the Grist component crates behind feature flags so that
//! applications can depend on a single crate.
//!
//! # Features
//!
//! - `fs` (default): filesystem helpers from `grist-fs`
//! - `text` (default): string helpers from `grist-text`

#![doc = include_str!("../README.md")]

pub use grist_core::{Error, Result, error};

#[cfg(feature = "fs")]
pub use grist_fs as fs;

#[cfg(feature = "text")]
pub use grist_text as text;
