//! Miette conversion for CLI errors.

use crate::error::{BuildError, CliError};
use lume_bundler::diagnostics::{DiagnosticError, to_diagnostic_error};
use miette::Report;

/// Every compile error of a failed one-shot build, rendered together.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{summary}")]
#[diagnostic(code(lume::build_failed), help("Fix the errors above and run the build again"))]
struct BuildFailure {
    summary: String,
    #[related]
    errors: Vec<DiagnosticError>,
}

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert BuildError to miette Report
pub fn build_error_to_miette(err: BuildError) -> Report {
    let summary = err.to_string();
    match err {
        BuildError::Failed { diagnostics, cwd } => {
            let errors = diagnostics
                .iter()
                .map(|diagnostic| to_diagnostic_error(diagnostic, &cwd))
                .collect();
            Report::new(BuildFailure { summary, errors })
        }
        other => miette::miette!("{}", other),
    }
}
