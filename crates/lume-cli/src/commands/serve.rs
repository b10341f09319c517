//! `lume serve`: serve the production build.

use crate::cli::ServeArgs;
use crate::commands::utils::{listen_addr, load_project, resolve_path};
use crate::error::Result;
use crate::server;
use crate::ui;
use tokio::signal;

pub async fn execute(args: ServeArgs) -> Result<()> {
    let (cwd, config) = load_project(&args.project, args.port)?;
    let out_dir = resolve_path(&config.out_dir, &cwd);

    tokio::select! {
        result = server::serve(&out_dir, listen_addr(config.port)) => result?,
        _ = signal::ctrl_c() => ui::info("Shutting down..."),
    }
    Ok(())
}
