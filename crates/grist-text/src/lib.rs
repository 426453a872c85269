//! Grist Text — string helpers.
//!
//! All positions and lengths are measured in Unicode code points.
//!
//! # Modules
//!
//! - [`chars`]: Code-point slicing, indexing, length and containment
//! - [`case`]: Unicode title casing
//! - [`encoding`]: Charset transcoding
//! - [`suffix`]: Suffix normalization
//! - [`token`]: Random URL-safe tokens

#![doc = include_str!("../README.md")]

pub mod case;
pub mod chars;
pub mod encoding;
pub mod suffix;
pub mod token;

pub use case::title;
pub use chars::{char_at, contains, length, substring};
pub use encoding::{
    DEFAULT_FROM_ENCODING, DEFAULT_TO_ENCODING, convert_encoding, convert_to_utf8, length_in,
};
pub use suffix::ensure_suffix;
pub use token::{DEFAULT_TOKEN_LENGTH, random_token};

pub use grist_core::{Error, Result};
