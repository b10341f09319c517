//! `lume dev`: development server lifecycle.
//!
//! 1. Initial development build (fatal on failure)
//! 2. File watcher on the project directory
//! 3. HTTP server with the live update endpoint
//! 4. Rebuild loop until Ctrl+C

use crate::assets::AssetSync;
use crate::cli::DevArgs;
use crate::commands::utils::{
    compiler_for, listen_addr, load_project, resolve_path, validate_entry,
};
use crate::dev::{self, FileWatcher, LiveChannel, RebuildLoop, WatchFilter};
use crate::error::{CliError, Result};
use crate::ui;
use lume_bundler::BuildMode;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;

/// Execute the dev command.
///
/// Blocks until Ctrl+C. Only a failed initial build, a bind failure or a
/// watcher that cannot start end it early with an error.
pub async fn execute(args: DevArgs) -> Result<()> {
    ui::info("Starting development server...");

    let (cwd, config) = load_project(&args.project, args.port)?;
    validate_entry(&resolve_path(&config.entry, &cwd))?;
    let out_dir = resolve_path(&config.out_dir, &cwd);

    ui::info(&format!("Entry point: {}", config.entry.display()));
    ui::info(&format!("Working directory: {}", cwd.display()));

    let channel = Arc::new(LiveChannel::new());
    let mut rebuild = RebuildLoop::new(
        Arc::new(compiler_for(&config, &cwd)),
        AssetSync::from_config(&config, &cwd, BuildMode::Development),
        channel.clone(),
        &cwd,
    )
    .with_debounce(Duration::from_millis(config.debounce_ms));

    ui::info("Performing initial build...");
    rebuild.initial_build().await?;

    let filter = WatchFilter::new(config.watch_ignore_patterns()).ignore_dir(&out_dir);
    let (watcher, changes) = FileWatcher::new(cwd.clone(), filter)?;
    ui::info(&format!("Watching for changes in: {}", watcher.root().display()));

    let addr = listen_addr(config.port);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| CliError::Server(format!("Failed to bind to {addr}: {e}")))?;
    ui::success(&format!(
        "Development server running at http://localhost:{}",
        config.port
    ));

    let mut server_handle = tokio::spawn(dev::serve(listener, dev::router(channel, &out_dir)));
    let rebuild_handle = tokio::spawn(async move { rebuild.run(changes).await });

    ui::info("Press Ctrl+C to stop");
    tokio::select! {
        _ = signal::ctrl_c() => {
            ui::info("Shutting down development server...");
        }
        result = &mut server_handle => {
            if let Ok(Err(err)) = result {
                ui::error(&err.to_string());
            }
            ui::warning("Server task completed unexpectedly");
        }
    }

    rebuild_handle.abort();
    server_handle.abort();
    drop(watcher);
    ui::success("Development server stopped");
    Ok(())
}
