//! Error handling for the Lume CLI.
//!
//! Hierarchy:
//! - [`CliError`] is what every command returns.
//! - [`ConfigError`] and [`BuildError`] carry domain detail and convert into it
//!   via `#[from]`.
//!
//! Only fatal conditions are errors. A failed rebuild during `lume dev` is
//! reported to the browser and never becomes a `CliError`.

mod report;

pub use report::{build_error_to_miette, cli_error_to_miette};

use lume_bundler::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Build errors (compile failure, missing entry point)
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file passed with `--config` doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a lume.config.json file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Sources merged but the result doesn't fit the schema
    #[error("Invalid configuration: {0}\n\nHint: Check lume.config.json and LUME_* environment variables")]
    Invalid(String),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

/// Build process errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Entry point file doesn't exist
    #[error("Entry point not found: {}\n\nHint: Check the 'entry' field in your config or --entry argument", .0.display())]
    EntryNotFound(PathBuf),

    /// The compiler rejected the source
    #[error("{}", failure_summary(.diagnostics))]
    Failed {
        /// Diagnostics in the order the compiler reported them
        diagnostics: Vec<Diagnostic>,
        /// Directory diagnostic paths are relative to
        cwd: PathBuf,
    },
}

fn failure_summary(diagnostics: &[Diagnostic]) -> String {
    match diagnostics.len() {
        1 => "Build failed with 1 error".to_string(),
        n => format!("Build failed with {n} errors"),
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
