//! Project configuration.
//!
//! Sources, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `lume.config.json` in the project root (or `--config <path>`)
//! 3. `LUME_*` environment variables (`LUME_OUT_DIR=build`)
//! 4. `PORT`
//! 5. command-line flags

mod defaults;
mod loading;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use defaults::*;
pub use loading::{CONFIG_FILE, ConfigOverrides};

/// Lume configuration, loaded from `lume.config.json` and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LumeConfig {
    /// Application entry point
    #[serde(default = "default_entry")]
    pub entry: PathBuf,

    /// Directory holding `index.css` and an optional `hmr-client.js`
    #[serde(default = "default_src_dir")]
    pub src_dir: PathBuf,

    /// Output directory
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Document title; defaults to the project directory name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Explicit esbuild executable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esbuild: Option<PathBuf>,

    /// HTTP port for `lume dev` and `lume serve`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Extra watch ignore patterns (`node_modules`, `*.log`)
    #[serde(default)]
    pub watch_ignore: Vec<String>,

    /// Window in which repeated events for one file count as one change
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for LumeConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            title: None,
            esbuild: None,
            port: default_port(),
            watch_ignore: Vec::new(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl LumeConfig {
    /// Title for the generated entry document.
    pub fn document_title(&self, cwd: &Path) -> String {
        self.title
            .clone()
            .or_else(|| {
                cwd.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Patterns the dev watcher skips: defaults, the output directory, then
    /// user patterns.
    pub fn watch_ignore_patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> =
            DEFAULT_WATCH_IGNORE.iter().map(|p| p.to_string()).collect();
        if self.out_dir.is_relative() {
            patterns.push(self.out_dir.to_string_lossy().into_owned());
        }
        patterns.extend(self.watch_ignore.iter().cloned());
        patterns
    }
}
