//! Grist CLI application.
//!
//! Dispatches parsed commands to `grist-fs` and `grist-text`, writing
//! results to a caller-supplied writer so the handlers can be tested
//! without capturing stdout.

use crate::cli::{CliArgs, Command, ConfigAction};
use crate::config::{GristConfig, parse_mode};
use grist_core::{Error, Result};
use grist_fs::{ExtensionSet, ListOptions, ReadMode, WriteMode};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ============================================================================
// GristCli
// ============================================================================

/// CLI application holding the loaded configuration.
pub struct GristCli {
    config: GristConfig,
}

impl GristCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = GristConfig::load(args.config.as_deref())?;
        Ok(Self::new(config))
    }

    /// Create a CLI application with an explicit configuration.
    pub fn new(config: GristConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &GristConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity
    /// flags. Records from the `log` facade used by the library crates are
    /// forwarded to the same subscriber.
    pub fn init_logging(verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments, writing results to stdout.
    pub fn run(&self, args: CliArgs) -> Result<()> {
        Self::init_logging(args.verbose, args.quiet);

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute(args.command, args.config.as_deref(), &mut out)
    }

    /// Execute one command, writing its output to `out`.
    pub fn execute(
        &self,
        command: Command,
        config_path: Option<&str>,
        out: &mut impl Write,
    ) -> Result<()> {
        let fs_config = &self.config().fs;
        let text_config = &self.config().text;

        match command {
            Command::Exists { path } => emit(out, grist_fs::exists(&path)),
            Command::Read { path, lock } => {
                let mode = ReadMode::from(lock || fs_config.lock);
                let bytes = grist_fs::read_file(&path, mode)?;
                out.write_all(&bytes)?;
                Ok(())
            }
            Command::Write {
                path,
                content,
                lock,
            } => {
                let mode = WriteMode::from(lock || fs_config.lock);
                let written = grist_fs::write_file(&path, content.as_bytes(), mode)?;
                debug!("wrote {written} bytes to {}", path.display());
                emit(out, written)
            }
            Command::Append {
                path,
                content,
                lock,
            } => {
                let mode = WriteMode::from(lock || fs_config.lock);
                let written = grist_fs::append_file_strict(&path, content.as_bytes(), mode)?;
                emit(out, written)
            }
            Command::Mkdir {
                path,
                mode,
                parents,
            } => {
                let mode = match mode {
                    Some(mode) => parse_mode(&mode)?,
                    None => fs_config.dir_mode()?,
                };
                require(
                    grist_fs::make_dir(&path, mode, parents),
                    format!("mkdir {}", path.display()),
                )
            }
            Command::Mv {
                source,
                destination,
            } => require(
                grist_fs::move_path(&source, &destination),
                format!("move {} -> {}", source.display(), destination.display()),
            ),
            Command::Mvdir {
                source,
                destination,
                overwrite,
            } => require(
                grist_fs::move_dir(&source, &destination, overwrite),
                format!("move {} -> {}", source.display(), destination.display()),
            ),
            Command::Ls {
                directory,
                extensions,
                flat,
                max_depth,
                json,
            } => {
                let options = ListOptions::default()
                    .with_recursive(fs_config.recursive && !flat)
                    .with_max_depth(max_depth.unwrap_or(fs_config.max_depth));
                let files = grist_fs::list_files(
                    &directory,
                    ExtensionSet::parse(&extensions),
                    options,
                )?
                .collect::<Result<Vec<PathBuf>>>()?;
                info!("{} matching files under {}", files.len(), directory.display());
                print_paths(out, &files, json)
            }
            Command::Rmdir {
                directory,
                preserve,
                strict,
            } => {
                if strict {
                    grist_fs::delete_dir_strict(&directory, preserve)
                } else {
                    require(
                        grist_fs::delete_dir(&directory, preserve),
                        format!("delete {}", directory.display()),
                    )
                }
            }
            Command::Rm { paths } => require(
                grist_fs::delete(&paths),
                format!("delete {} path(s)", paths.len()),
            ),
            Command::Token { length } => emit(
                out,
                grist_text::random_token(length.unwrap_or(text_config.token_length)),
            ),
            Command::Title { text } => emit(out, grist_text::title(&text)),
            Command::Suffix { text, suffix } => emit(out, grist_text::ensure_suffix(&text, &suffix)),
            Command::Substr {
                text,
                start,
                length,
            } => emit(out, grist_text::substring(&text, start, length)),
            Command::CharAt { text, index } => match grist_text::char_at(&text, index) {
                Some(c) => emit(out, c),
                None => Err(Error::invalid_input(format!(
                    "index {index} is out of range for a string of length {}",
                    grist_text::length(&text)
                ))),
            },
            Command::Len { text } => emit(out, grist_text::length(&text)),
            Command::Convert { path, to, from } => {
                let input = grist_fs::read_file(&path, ReadMode::Unlocked)?;
                let to = to.as_deref().unwrap_or(&text_config.to_encoding);
                let from = from.as_deref().unwrap_or(&text_config.from_encoding);
                let converted = grist_text::convert_encoding(&input, to, from)?;
                out.write_all(&converted)?;
                Ok(())
            }
            Command::Config(config_cmd) => {
                self.handle_config(config_path, config_cmd.command, out)
            }
        }
    }

    /// Dispatch config subcommands.
    fn handle_config(
        &self,
        config_path: Option<&str>,
        action: ConfigAction,
        out: &mut impl Write,
    ) -> Result<()> {
        match action {
            ConfigAction::Path => match GristConfig::resolve_config_path(config_path) {
                Some(path) => {
                    if !grist_fs::exists(&path) {
                        info!("config file does not exist; run `grist config init` to create it");
                    }
                    emit(out, path.display())
                }
                None => Err(Error::config(
                    "Could not determine config directory for this platform",
                )),
            },
            ConfigAction::Show => {
                let toml = self.config().to_toml_string()?;
                out.write_all(toml.as_bytes())?;
                Ok(())
            }
            ConfigAction::Init { file, force } => {
                let path = match file {
                    Some(file) => PathBuf::from(file),
                    None => GristConfig::default_config_path().ok_or_else(|| {
                        Error::config("Could not determine config directory for this platform")
                    })?,
                };
                init_config_file(&path, force)?;
                emit(out, path.display())
            }
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn emit(out: &mut impl Write, value: impl std::fmt::Display) -> Result<()> {
    writeln!(out, "{value}")?;
    Ok(())
}

fn require(ok: bool, what: String) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::io(std::io::Error::other(format!("{what} failed"))))
    }
}

fn print_paths(out: &mut impl Write, files: &[PathBuf], json: bool) -> Result<()> {
    if json {
        let names: Vec<String> = files
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let body = serde_json::to_string_pretty(&names)
            .map_err(|e| Error::invalid_input(e.to_string()))?;
        return emit(out, body);
    }
    for file in files {
        emit(out, file.display())?;
    }
    Ok(())
}

/// Write the default configuration to `path`, creating its directory.
fn init_config_file(path: &Path, force: bool) -> Result<()> {
    if grist_fs::exists(path) && !force {
        return Err(Error::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        require(
            grist_fs::make_dir(parent, grist_fs::DEFAULT_DIR_MODE, true),
            format!("mkdir {}", parent.display()),
        )?;
    }

    let toml = GristConfig::default().to_toml_string()?;
    grist_fs::write_file(path, toml.as_bytes(), WriteMode::Locked)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
