//! Diagnostic extraction from esbuild's log output.
//!
//! esbuild is run with `--log-level=error --color=false`, so stderr only
//! carries error records. Two layouts are understood:
//!
//! ```text
//! ✘ [ERROR] Expected ";" but found "count"
//!
//!     src/main.jsx:10:3:
//!       10 │   let x count
//!          ╵         ^
//! ```
//!
//! and the legacy single-line form `> src/main.jsx:10:3: error: Expected ";"`.

use super::Diagnostic;
use regex::Regex;
use std::sync::LazyLock;

static ERROR_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:✘|X|×)?\s*\[ERROR\]\s*(.+?)\s*$").unwrap());

static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+(\S[^│╵]*?):(\d+):(\d+):\s*$").unwrap());

static LEGACY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*>\s*(.+?):(\d+):(\d+):\s*error:\s*(.+?)\s*$").unwrap()
});

/// Parse esbuild stderr into diagnostics, in reported order.
///
/// Returns an empty list when nothing recognisable is found; callers decide
/// how to report such output.
pub fn parse_esbuild_log(log: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut pending: Option<Diagnostic> = None;

    for line in log.lines() {
        if let Some(caps) = ERROR_HEADER.captures(line) {
            if let Some(done) = pending.take() {
                diagnostics.push(done);
            }
            pending = Some(Diagnostic::message(&caps[1]));
            continue;
        }

        if let Some(caps) = LEGACY.captures(line) {
            if let Some(done) = pending.take() {
                diagnostics.push(done);
            }
            diagnostics.push(Diagnostic {
                file: Some(caps[1].to_string()),
                line: caps[2].parse().ok(),
                column: caps[3].parse().ok(),
                message: caps[4].to_string(),
            });
            continue;
        }

        // Only the first location after a header belongs to it; later ones
        // are notes ("The symbol was declared here").
        if let Some(diag) = pending.as_mut() {
            if diag.file.is_none() {
                if let Some(caps) = LOCATION.captures(line) {
                    diag.file = Some(caps[1].to_string());
                    diag.line = caps[2].parse().ok();
                    diag.column = caps[3].parse().ok();
                }
            }
        }
    }

    if let Some(done) = pending {
        diagnostics.push(done);
    }
    diagnostics
}
