//! Command-line front end for Grist.
//!
//! # Modules
//!
//! - [`cli`]: clap argument and subcommand definitions
//! - [`config`]: `confyg`-backed configuration
//! - [`app`]: command dispatch and logging setup

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;

pub use app::GristCli;
pub use cli::{CliArgs, Command};
pub use config::GristConfig;
