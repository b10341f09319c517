//! Compiler backed by the `esbuild` executable.
//!
//! esbuild writes into a staging directory inside the output directory. The
//! bundle (and its source map) is only renamed into its served location after
//! esbuild exits successfully, so a failed build never replaces or corrupts
//! the previous artifact.

use crate::compiler::Compiler;
use crate::diagnostics::{Diagnostic, parse_esbuild_log};
use crate::options::{BuildMode, BuildPlan, resolve};
use crate::outcome::BuildOutcome;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::process::Command;
use tokio::sync::Mutex;

/// Drives the esbuild CLI for one project.
pub struct EsbuildCompiler {
    plan: BuildPlan,
    // Serializes compiles so two builds never race on the staging files.
    lock: Mutex<()>,
}

impl EsbuildCompiler {
    pub fn new(plan: BuildPlan) -> Self {
        Self {
            plan,
            lock: Mutex::new(()),
        }
    }

    pub fn plan(&self) -> &BuildPlan {
        &self.plan
    }

    /// Executable to run: explicit path, then the project-local install,
    /// then whatever `esbuild` resolves to on `PATH`.
    pub fn executable(&self) -> PathBuf {
        if let Some(explicit) = &self.plan.esbuild {
            return resolve(&self.plan.cwd, explicit);
        }

        let local_name = if cfg!(windows) { "esbuild.cmd" } else { "esbuild" };
        let local = self.plan.cwd.join("node_modules").join(".bin").join(local_name);
        if local.is_file() {
            return local;
        }

        PathBuf::from("esbuild")
    }

    async fn run(&self, mode: BuildMode) -> Result<PathBuf, Vec<Diagnostic>> {
        let staging = self.plan.staging_dir();
        tokio::fs::create_dir_all(&staging).await.map_err(|e| {
            vec![Diagnostic::message(format!(
                "Failed to create output directory {}: {e}",
                staging.display()
            ))]
        })?;

        let staged = staging.join(&self.plan.bundle_name);
        discard_staged(&staged).await;

        let program = self.executable();
        let args = esbuild_args(&self.plan, mode, &staged);
        tracing::debug!(program = %program.display(), ?args, "running esbuild");

        let output = Command::new(&program)
            .args(&args)
            .current_dir(&self.plan.cwd)
            .output()
            .await
            .map_err(|e| {
                vec![Diagnostic::message(format!(
                    "Failed to launch esbuild ({}): {e}",
                    program.display()
                ))]
            })?;

        if !output.status.success() {
            discard_staged(&staged).await;
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut diagnostics = parse_esbuild_log(&stderr);
            if diagnostics.is_empty() {
                let raw = stderr.trim();
                diagnostics.push(Diagnostic::message(if raw.is_empty() {
                    format!("esbuild exited with {}", output.status)
                } else {
                    raw.to_string()
                }));
            }
            return Err(diagnostics);
        }

        self.promote(mode, &staged).await.map_err(|e| {
            vec![Diagnostic::message(format!(
                "Failed to move bundle into {}: {e}",
                self.plan.out_dir().display()
            ))]
        })
    }

    async fn promote(&self, mode: BuildMode, staged: &Path) -> std::io::Result<PathBuf> {
        let artifact = self.plan.artifact_path();
        let staged_map = map_path(staged);
        let artifact_map = map_path(&artifact);

        if mode.sourcemap() && tokio::fs::try_exists(&staged_map).await.unwrap_or(false) {
            tokio::fs::rename(&staged_map, &artifact_map).await?;
        } else {
            // A map left over from a development build would point at code
            // that no longer exists.
            match tokio::fs::remove_file(&artifact_map).await {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e),
                _ => {}
            }
        }

        tokio::fs::rename(staged, &artifact).await?;
        Ok(artifact)
    }
}

#[async_trait]
impl Compiler for EsbuildCompiler {
    async fn compile(&self, mode: BuildMode) -> BuildOutcome {
        let _guard = self.lock.lock().await;
        let start = Instant::now();

        match self.run(mode).await {
            Ok(artifact_path) => {
                tracing::debug!(
                    %mode,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "esbuild finished"
                );
                BuildOutcome::Success { artifact_path }
            }
            Err(diagnostics) => {
                tracing::debug!(%mode, count = diagnostics.len(), "esbuild reported errors");
                BuildOutcome::Failure { diagnostics }
            }
        }
    }
}

/// Command-line arguments for one esbuild invocation.
pub fn esbuild_args(plan: &BuildPlan, mode: BuildMode, outfile: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        plan.entry.clone().into_os_string(),
        "--bundle".into(),
        prefixed("--outfile=", outfile),
        "--loader:.js=jsx".into(),
        "--loader:.jsx=jsx".into(),
        format!("--define:process.env.NODE_ENV=\"{}\"", mode.node_env()).into(),
        "--log-level=error".into(),
        "--color=false".into(),
    ];

    if mode.minify() {
        args.push("--minify".into());
        args.push(format!("--target={}", plan.target).into());
    }
    if mode.sourcemap() {
        args.push("--sourcemap".into());
    }
    if mode.esm() {
        args.push("--format=esm".into());
    }

    args
}

fn prefixed(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path.as_os_str());
    arg
}

fn map_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".map");
    PathBuf::from(name)
}

async fn discard_staged(staged: &Path) {
    let _ = tokio::fs::remove_file(staged).await;
    let _ = tokio::fs::remove_file(map_path(staged)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_production_args() {
        let plan = BuildPlan::new("/project", "src/main.jsx", "dist");
        let args = strings(esbuild_args(
            &plan,
            BuildMode::Production,
            Path::new("/project/dist/.lume-staging/bundle.js"),
        ));

        assert_eq!(args[0], "src/main.jsx");
        assert!(args.contains(&"--bundle".to_string()));
        assert!(args.contains(&"--outfile=/project/dist/.lume-staging/bundle.js".to_string()));
        assert!(args.contains(&"--define:process.env.NODE_ENV=\"production\"".to_string()));
        assert!(args.contains(&"--minify".to_string()));
        assert!(args.contains(&"--target=es2017".to_string()));
        assert!(!args.contains(&"--sourcemap".to_string()));
        assert!(!args.contains(&"--format=esm".to_string()));
    }

    #[test]
    fn test_development_args() {
        let plan = BuildPlan::new("/project", "src/main.jsx", "dist");
        let args = strings(esbuild_args(
            &plan,
            BuildMode::Development,
            Path::new("/project/dist/.lume-staging/bundle.js"),
        ));

        assert!(args.contains(&"--define:process.env.NODE_ENV=\"development\"".to_string()));
        assert!(args.contains(&"--sourcemap".to_string()));
        assert!(args.contains(&"--format=esm".to_string()));
        assert!(args.contains(&"--loader:.jsx=jsx".to_string()));
        assert!(!args.contains(&"--minify".to_string()));
    }

    #[test]
    fn test_executable_resolution() {
        let temp = tempfile::TempDir::new().unwrap();
        let plan = BuildPlan::new(temp.path(), "src/main.jsx", "dist");

        let compiler = EsbuildCompiler::new(plan.clone());
        assert_eq!(compiler.executable(), PathBuf::from("esbuild"));

        let bin = temp.path().join("node_modules/.bin");
        std::fs::create_dir_all(&bin).unwrap();
        let local_name = if cfg!(windows) { "esbuild.cmd" } else { "esbuild" };
        std::fs::write(bin.join(local_name), "").unwrap();
        assert_eq!(compiler.executable(), bin.join(local_name));

        let explicit = EsbuildCompiler::new(plan.with_esbuild("tools/esbuild"));
        assert_eq!(explicit.executable(), temp.path().join("tools/esbuild"));
    }

    #[test]
    fn test_map_path() {
        assert_eq!(
            map_path(Path::new("dist/bundle.js")),
            PathBuf::from("dist/bundle.js.map")
        );
    }
}
