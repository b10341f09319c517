//! Command-line interface definition.
//!
//! # Command Structure
//!
//! - `lume build` - One-shot production bundle into the output directory
//! - `lume dev` - Watch, rebuild and push live updates to the browser
//! - `lume serve` - Serve a finished production build

mod commands;

use clap::Parser;

pub use commands::{BuildArgs, Command, DevArgs, ProjectArgs, ServeArgs};

/// Lume - bundle, live-reload and serve single-page apps
#[derive(Parser, Debug)]
#[command(
    name = "lume",
    version,
    about = "Bundle, live-reload and serve single-page apps",
    long_about = "Lume drives esbuild to bundle a single-page application.\n\
                  In development it watches the sources, rebuilds on change and\n\
                  hot-swaps the running app in the browser while keeping its state."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
