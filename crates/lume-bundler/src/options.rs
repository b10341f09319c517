//! Build modes and the per-project build plan.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default file name of the compiled bundle inside the output directory.
pub const DEFAULT_BUNDLE_NAME: &str = "bundle.js";

/// Compilation mode.
///
/// Development builds keep code readable, emit source maps and produce an ES
/// module so the client runtime can re-import it. Production builds minify
/// for a fixed language target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Value substituted for `process.env.NODE_ENV` in application code.
    pub fn node_env(self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        }
    }

    pub fn minify(self) -> bool {
        matches!(self, BuildMode::Production)
    }

    pub fn sourcemap(self) -> bool {
        matches!(self, BuildMode::Development)
    }

    /// Whether the bundle is emitted as an ES module.
    pub fn esm(self) -> bool {
        matches!(self, BuildMode::Development)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_env())
    }
}

/// Everything the compiler needs to know about a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    /// Directory the compiler runs in; relative paths resolve against it.
    pub cwd: PathBuf,
    /// Single application entry point (e.g. `src/main.jsx`).
    pub entry: PathBuf,
    /// Output directory for the bundle.
    pub out_dir: PathBuf,
    /// File name of the bundle inside `out_dir`.
    pub bundle_name: String,
    /// JavaScript target for production output.
    pub target: String,
    /// Explicit path to the esbuild executable.
    pub esbuild: Option<PathBuf>,
}

impl BuildPlan {
    pub fn new(
        cwd: impl Into<PathBuf>,
        entry: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cwd: cwd.into(),
            entry: entry.into(),
            out_dir: out_dir.into(),
            bundle_name: DEFAULT_BUNDLE_NAME.to_string(),
            target: "es2017".to_string(),
            esbuild: None,
        }
    }

    pub fn with_esbuild(mut self, esbuild: impl Into<PathBuf>) -> Self {
        self.esbuild = Some(esbuild.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Output directory resolved against `cwd`.
    pub fn out_dir(&self) -> PathBuf {
        resolve(&self.cwd, &self.out_dir)
    }

    /// Final, served location of the bundle.
    pub fn artifact_path(&self) -> PathBuf {
        self.out_dir().join(&self.bundle_name)
    }

    /// Scratch directory the compiler writes into before promotion.
    pub fn staging_dir(&self) -> PathBuf {
        self.out_dir().join(".lume-staging")
    }
}

pub(crate) fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
