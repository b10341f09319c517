//! `lume build`: one-shot production bundle.

use crate::assets::AssetSync;
use crate::cli::BuildArgs;
use crate::commands::utils::{compiler_for, load_project, resolve_path, validate_entry};
use crate::config::LumeConfig;
use crate::error::{BuildError, Result};
use crate::ui;
use lume_bundler::{BuildMode, BuildOutcome, Compiler};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the build command.
///
/// # Errors
///
/// - configuration that fails to load or validate
/// - a missing entry point
/// - compile errors, as [`BuildError::Failed`] with every diagnostic
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    ui::info("Loading configuration...");
    let (cwd, config) = load_project(&args.project, None)?;
    validate_entry(&resolve_path(&config.entry, &cwd))?;

    ui::info(&format!("Building: {}", config.entry.display()));
    let compiler = compiler_for(&config, &cwd);
    let artifact = build_with(&compiler, &config, &cwd).await?;

    let size = std::fs::metadata(&artifact).map(|m| m.len()).unwrap_or(0);
    ui::success(&format!(
        "Built {} ({}) in {}",
        artifact.display(),
        ui::format_size(size),
        ui::format_duration(start_time.elapsed())
    ));
    Ok(())
}

/// Production compile followed by asset synchronization.
///
/// Assets are only placed after a successful compile so a failed build
/// never leaves an entry document pointing at a missing bundle.
pub async fn build_with(
    compiler: &dyn Compiler,
    config: &LumeConfig,
    cwd: &Path,
) -> Result<PathBuf> {
    match compiler.compile(BuildMode::Production).await {
        BuildOutcome::Success { artifact_path } => {
            let report = AssetSync::from_config(config, cwd, BuildMode::Production).sync();
            for (asset, reason) in &report.failed {
                ui::warning(&format!("Could not write {asset}: {reason}"));
            }
            Ok(artifact_path)
        }
        BuildOutcome::Failure { diagnostics } => Err(BuildError::Failed {
            diagnostics,
            cwd: cwd.to_path_buf(),
        }
        .into()),
    }
}
