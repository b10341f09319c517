use crate::config::ConfigOverrides;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available Lume subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bundle the app for production
    ///
    /// Minified bundle, stylesheet and entry document are written to the
    /// output directory. Exits non-zero when the compiler reports errors.
    Build(BuildArgs),

    /// Start the development server
    ///
    /// Rebuilds on every source change and pushes the result to connected
    /// browsers over a WebSocket. Compile errors are shown in the page.
    Dev(DevArgs),

    /// Serve the production build
    ///
    /// Unknown paths fall back to index.html for client-side routing.
    Serve(ServeArgs),
}

/// Options shared by every command that works on a project.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project directory
    #[arg(short = 'C', long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file (defaults to lume.config.json in the project directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Entry module, relative to the project directory
    #[arg(short, long, value_name = "FILE")]
    pub entry: Option<PathBuf>,

    /// Output directory, relative to the project directory
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn to_overrides(&self, port: Option<u16>) -> ConfigOverrides {
        ConfigOverrides {
            entry: self.entry.clone(),
            out_dir: self.out_dir.clone(),
            port,
        }
    }
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Arguments for the dev command
#[derive(Args, Debug)]
pub struct DevArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Port to listen on (overrides PORT and the config file)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Port to listen on (overrides PORT and the config file)
    #[arg(short, long)]
    pub port: Option<u16>,
}
