//! Asset synchronizer.
//!
//! Places the non-JavaScript files the browser needs next to the bundle:
//!
//! | file            | origin                                           | modes |
//! |-----------------|--------------------------------------------------|-------|
//! | `index.css`     | `<src_dir>/index.css`, skipped when missing      | both  |
//! | `hmr-client.js` | `<src_dir>/hmr-client.js`, else the built-in one | dev   |
//! | `index.html`    | generated                                        | both  |
//!
//! Every item is independent. A failing item is logged and recorded in the
//! [`SyncReport`]; it never aborts the others and never fails a build.

mod document;

pub use document::entry_document;

use crate::config::LumeConfig;
use lume_bundler::BuildMode;
use rust_embed::RustEmbed;
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_CSS: &str = "index.css";
pub const HMR_CLIENT: &str = "hmr-client.js";
pub const INDEX_HTML: &str = "index.html";

/// Files shipped inside the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
struct RuntimeAssets;

/// The live-update runtime served when the project has none of its own.
pub fn builtin_hmr_client() -> Option<Vec<u8>> {
    RuntimeAssets::get(HMR_CLIENT).map(|file| file.data.into_owned())
}

/// What one [`AssetSync::sync`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub written: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
    pub failed: Vec<(&'static str, String)>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, name: &'static str, result: std::io::Result<Placed>) {
        match result {
            Ok(Placed::Written) => self.written.push(name),
            Ok(Placed::Skipped) => self.skipped.push(name),
            Err(err) => {
                tracing::warn!(asset = name, error = %err, "failed to place asset");
                self.failed.push((name, err.to_string()));
            }
        }
    }
}

enum Placed {
    Written,
    Skipped,
}

/// Copies/writes the fixed asset set into the output directory.
#[derive(Debug, Clone)]
pub struct AssetSync {
    src_dir: PathBuf,
    out_dir: PathBuf,
    mode: BuildMode,
    title: String,
}

impl AssetSync {
    pub fn new(
        src_dir: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
        mode: BuildMode,
        title: impl Into<String>,
    ) -> Self {
        Self {
            src_dir: src_dir.into(),
            out_dir: out_dir.into(),
            mode,
            title: title.into(),
        }
    }

    /// Synchronizer for the project rooted at `cwd`.
    pub fn from_config(config: &LumeConfig, cwd: &Path, mode: BuildMode) -> Self {
        Self::new(
            cwd.join(&config.src_dir),
            cwd.join(&config.out_dir),
            mode,
            config.document_title(cwd),
        )
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Place every asset for this mode. Safe to call repeatedly.
    pub fn sync(&self) -> SyncReport {
        let mut report = SyncReport::default();

        if let Err(err) = fs::create_dir_all(&self.out_dir) {
            tracing::warn!(
                dir = %self.out_dir.display(),
                error = %err,
                "cannot create output directory"
            );
        }

        report.record(INDEX_CSS, self.copy_optional(INDEX_CSS));
        if self.mode == BuildMode::Development {
            report.record(HMR_CLIENT, self.place_hmr_client());
        }
        report.record(
            INDEX_HTML,
            write_if_changed(
                &self.out_dir.join(INDEX_HTML),
                entry_document(self.mode, &self.title).as_bytes(),
            ),
        );

        tracing::debug!(?report, "assets synced");
        report
    }

    fn copy_optional(&self, name: &str) -> std::io::Result<Placed> {
        let src = self.src_dir.join(name);
        if !src.is_file() {
            tracing::warn!(asset = name, path = %src.display(), "source asset missing, skipped");
            return Ok(Placed::Skipped);
        }
        let bytes = fs::read(&src)?;
        write_if_changed(&self.out_dir.join(name), &bytes)
    }

    fn place_hmr_client(&self) -> std::io::Result<Placed> {
        let project_client = self.src_dir.join(HMR_CLIENT);
        let bytes = if project_client.is_file() {
            fs::read(&project_client)?
        } else {
            builtin_hmr_client().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "built-in hmr-client.js missing")
            })?
        };
        write_if_changed(&self.out_dir.join(HMR_CLIENT), &bytes)
    }
}

/// Write `bytes` unless `path` already holds exactly them.
fn write_if_changed(path: &Path, bytes: &[u8]) -> std::io::Result<Placed> {
    if fs::read(path).is_ok_and(|existing| existing == bytes) {
        return Ok(Placed::Written);
    }
    fs::write(path, bytes)?;
    Ok(Placed::Written)
}
