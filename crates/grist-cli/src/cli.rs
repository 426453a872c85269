//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "grist", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "GRIST_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print whether a path exists.
    Exists {
        /// Path to check.
        path: PathBuf,
    },

    /// Print a file's contents.
    Read {
        /// File to read.
        path: PathBuf,

        /// Hold a shared lock while reading.
        #[arg(long)]
        lock: bool,
    },

    /// Replace a file's contents.
    Write {
        /// File to write.
        path: PathBuf,

        /// New contents.
        content: String,

        /// Hold an exclusive lock while writing.
        #[arg(long)]
        lock: bool,
    },

    /// Append to a file, creating it if needed.
    Append {
        /// File to append to.
        path: PathBuf,

        /// Contents to append.
        content: String,

        /// Hold an exclusive lock while appending.
        #[arg(long)]
        lock: bool,
    },

    /// Create a directory.
    Mkdir {
        /// Directory to create.
        path: PathBuf,

        /// Octal permission mode (defaults to `fs.dir_mode`).
        #[arg(short, long)]
        mode: Option<String>,

        /// Create missing parent directories.
        #[arg(short, long)]
        parents: bool,
    },

    /// Move a file, falling back to copy-and-delete.
    Mv {
        /// Source path.
        source: PathBuf,

        /// Destination path.
        destination: PathBuf,
    },

    /// Rename a directory.
    Mvdir {
        /// Source directory.
        source: PathBuf,

        /// Destination directory.
        destination: PathBuf,

        /// Delete an existing destination directory first.
        #[arg(long)]
        overwrite: bool,
    },

    /// List files by extension.
    Ls {
        /// Directory to list.
        directory: PathBuf,

        /// Comma-separated extensions, e.g. "rs,toml".
        extensions: String,

        /// Only list the directory's immediate entries.
        #[arg(long)]
        flat: bool,

        /// Maximum depth of listed files (0 is unbounded).
        #[arg(long)]
        max_depth: Option<usize>,

        /// Print a JSON array instead of one path per line.
        #[arg(long)]
        json: bool,
    },

    /// Recursively delete a directory.
    Rmdir {
        /// Directory to delete.
        directory: PathBuf,

        /// Keep the emptied directory itself.
        #[arg(long)]
        preserve: bool,

        /// Stop at the first failed removal.
        #[arg(long)]
        strict: bool,
    },

    /// Delete files.
    Rm {
        /// Files to delete.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print a random alphanumeric token.
    Token {
        /// Token length (defaults to `text.token_length`).
        length: Option<usize>,
    },

    /// Title-case text.
    Title {
        /// Text to convert.
        text: String,
    },

    /// Collapse trailing repetitions of a suffix to exactly one.
    Suffix {
        /// Text to normalize.
        text: String,

        /// Suffix to enforce.
        suffix: String,
    },

    /// Print a substring counted in code points.
    Substr {
        /// Source text.
        text: String,

        /// Start index; negative counts from the end.
        #[arg(allow_negative_numbers = true)]
        start: isize,

        /// Number of code points; negative stops short of the end.
        #[arg(allow_negative_numbers = true)]
        length: Option<isize>,
    },

    /// Print the code point at an index.
    CharAt {
        /// Source text.
        text: String,

        /// Index; negative counts from the end.
        #[arg(allow_negative_numbers = true)]
        index: isize,
    },

    /// Print the length of text in code points.
    Len {
        /// Text to measure.
        text: String,
    },

    /// Transcode a file and write the result to stdout.
    Convert {
        /// File to read.
        path: PathBuf,

        /// Target charset (defaults to `text.to_encoding`).
        #[arg(long)]
        to: Option<String>,

        /// Source charset (defaults to `text.from_encoding`).
        #[arg(long)]
        from: Option<String>,
    },

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Print the effective configuration as TOML.
    Show,

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}
