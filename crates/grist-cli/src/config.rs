//! Configuration for the Grist CLI.
//!
//! Provides the [`GristConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `GRIST_CONFIG` environment variable
//! 3. XDG default: `~/.config/grist/config.toml`
//! 4. Built-in defaults
//!
//! `GRIST_FS_*` and `GRIST_TEXT_*` environment variables override values
//! from the file.

use confyg::{Confygery, env};
use grist_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Grist CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GristConfig {
    /// Filesystem command defaults.
    pub fs: FsConfig,

    /// Text command defaults.
    pub text: TextConfig,
}

/// Defaults for filesystem commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsConfig {
    /// Octal permission mode for `mkdir`, e.g. `"755"`.
    pub dir_mode: String,

    /// Take advisory locks for reads and writes even without `--lock`.
    pub lock: bool,

    /// Recurse into subdirectories for `ls` unless `--flat` is given.
    pub recursive: bool,

    /// Default `ls` depth bound; 0 is unbounded.
    pub max_depth: usize,
}

/// Defaults for text commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Length of tokens from `token` when none is given.
    pub token_length: usize,

    /// Source charset for `convert`.
    pub from_encoding: String,

    /// Target charset for `convert`.
    pub to_encoding: String,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            dir_mode: format!("{:o}", grist_fs::DEFAULT_DIR_MODE),
            lock: false,
            recursive: true,
            max_depth: 0,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            token_length: grist_text::DEFAULT_TOKEN_LENGTH,
            from_encoding: grist_text::DEFAULT_FROM_ENCODING.to_string(),
            to_encoding: grist_text::DEFAULT_TO_ENCODING.to_string(),
        }
    }
}

impl FsConfig {
    /// Parse [`FsConfig::dir_mode`] as an octal permission mode.
    pub fn dir_mode(&self) -> Result<u32> {
        parse_mode(&self.dir_mode)
    }
}

/// Parse an octal mode such as `"755"`, `"0755"` or `"0o755"`.
pub fn parse_mode(mode: &str) -> Result<u32> {
    let digits = mode.trim().trim_start_matches("0o");
    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|m| *m <= 0o7777)
        .ok_or_else(|| Error::invalid_input(format!("invalid octal mode: {mode:?}")))
}

// ============================================================================
// Config loading
// ============================================================================

impl GristConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("GRIST");
        env_opts.add_section("fs");
        env_opts.add_section("text");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("GRIST_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("grist").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_grist_config_default() {
        let config = GristConfig::default();
        assert_eq!(config.fs.dir_mode, "755");
        assert!(!config.fs.lock);
        assert!(config.fs.recursive);
        assert_eq!(config.fs.max_depth, 0);
        assert_eq!(config.text.token_length, 16);
        assert_eq!(config.text.from_encoding, "gb2312");
        assert_eq!(config.text.to_encoding, "utf-8");
    }

    #[test]
    fn test_grist_config_from_toml() {
        let toml_str = r#"
            [fs]
            dir_mode = "700"
            lock = true
            max_depth = 3

            [text]
            token_length = 40
        "#;

        let config: GristConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.fs.dir_mode().unwrap(), 0o700);
        assert!(config.fs.lock);
        assert!(config.fs.recursive);
        assert_eq!(config.fs.max_depth, 3);
        assert_eq!(config.text.token_length, 40);
        assert_eq!(config.text.from_encoding, "gb2312");
    }

    #[test]
    fn test_grist_config_toml_round_trip() {
        let config = GristConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[fs]"));
        assert!(toml_str.contains("dir_mode = \"755\""));

        let parsed: GristConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[text]\ntoken_length = 8\n").unwrap();

        let config = GristConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.text.token_length, 8);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let config = GristConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.text.token_length, 16);
    }

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = GristConfig::resolve_config_path(Some("/etc/grist.toml"));
        assert_eq!(path, Some(PathBuf::from("/etc/grist.toml")));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("755").unwrap(), 0o755);
        assert_eq!(parse_mode("0755").unwrap(), 0o755);
        assert_eq!(parse_mode("0o700").unwrap(), 0o700);
        assert!(parse_mode("999").is_err());
        assert!(parse_mode("").is_err());
        assert!(parse_mode("77777").is_err());
    }
}
