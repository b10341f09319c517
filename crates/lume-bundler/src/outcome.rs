//! Result of a single compile.

use crate::diagnostics::{Diagnostic, render_diagnostics};
use std::path::{Path, PathBuf};

/// Outcome of one compile: a written artifact or the reasons there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Success { artifact_path: PathBuf },
    Failure { diagnostics: Vec<Diagnostic> },
}

impl BuildOutcome {
    pub fn success(artifact_path: impl Into<PathBuf>) -> Self {
        BuildOutcome::Success {
            artifact_path: artifact_path.into(),
        }
    }

    pub fn failure(diagnostics: Vec<Diagnostic>) -> Self {
        BuildOutcome::Failure { diagnostics }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success { .. })
    }

    pub fn artifact_path(&self) -> Option<&Path> {
        match self {
            BuildOutcome::Success { artifact_path } => Some(artifact_path),
            BuildOutcome::Failure { .. } => None,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            BuildOutcome::Success { .. } => &[],
            BuildOutcome::Failure { diagnostics } => diagnostics,
        }
    }

    /// Rendered failure payload, `None` for a success.
    pub fn error_payload(&self) -> Option<String> {
        match self {
            BuildOutcome::Success { .. } => None,
            BuildOutcome::Failure { diagnostics } => Some(render_diagnostics(diagnostics)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_accessors() {
        let outcome = BuildOutcome::success("dist/bundle.js");
        assert!(outcome.is_success());
        assert_eq!(outcome.artifact_path(), Some(Path::new("dist/bundle.js")));
        assert!(outcome.diagnostics().is_empty());
        assert_eq!(outcome.error_payload(), None);
    }

    #[test]
    fn test_failure_payload() {
        let outcome = BuildOutcome::failure(vec![
            Diagnostic::located("main.jsx", 10, 3, "Unexpected token"),
            Diagnostic::message("1 more"),
        ]);
        assert!(!outcome.is_success());
        assert_eq!(outcome.artifact_path(), None);
        assert_eq!(
            outcome.error_payload().as_deref(),
            Some("main.jsx:10:3\nUnexpected token\n\n1 more")
        );
    }
}
