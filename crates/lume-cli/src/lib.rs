//! Lume CLI - bundle, live-reload and serve single-page apps.
//!
//! # Architecture
//!
//! - [`config`] - `lume.config.json`, `LUME_*` and `PORT` layered with figment
//! - [`assets`] - stylesheet, live-update runtime and entry document
//! - [`dev`] - file watcher, rebuild loop, live update channel and dev server
//! - [`server`] - static server for production builds
//! - [`error`] - error types with actionable messages
//! - [`logger`] / [`ui`] - structured logging and terminal output
//!
//! Compilation itself lives in `lume-bundler`; the browser-side reload
//! contract is modelled in `lume-runtime`.
//!
//! ```rust
//! use lume_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dev;
pub mod error;
pub mod logger;
pub mod server;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result};
