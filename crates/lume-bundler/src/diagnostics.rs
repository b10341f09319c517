//! Structured compiler diagnostics.
//!
//! A failed build produces an ordered list of [`Diagnostic`]s. The order is
//! the order in which the compiler reported them and must survive every
//! transformation, including [`render_diagnostics`], which produces the text
//! payload pushed to browsers.

mod parse;
mod report;

pub use parse::parse_esbuild_log;
pub use report::{DiagnosticError, to_diagnostic_error};

use serde::{Deserialize, Serialize};
use std::fmt;

/// One compiler error with an optional source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic without location information.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            file: None,
            line: None,
            column: None,
            message: message.into(),
        }
    }

    /// Create a diagnostic pointing at `file:line:column`.
    pub fn located(
        file: impl Into<String>,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            column: Some(column),
            message: message.into(),
        }
    }

    /// Location prefix (`file:line:column`), or `None` when the diagnostic
    /// carries no file.
    ///
    /// Missing line or column components are left out rather than printed as
    /// placeholders, so a file-only diagnostic renders as just the file.
    pub fn location(&self) -> Option<String> {
        let file = self.file.as_deref()?;
        let mut loc = file.to_string();
        if let Some(line) = self.line {
            loc.push_str(&format!(":{line}"));
            if let Some(column) = self.column {
                loc.push_str(&format!(":{column}"));
            }
        }
        Some(loc)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location() {
            Some(loc) => write!(f, "{loc}\n{}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Render diagnostics as the human-readable error payload.
///
/// Each diagnostic becomes one block, `"<file>:<line>:<column>\n<message>"`
/// (message only when there is no location), and blocks are separated by a
/// blank line. The output is deterministic and preserves input order.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mixed_located_and_bare() {
        let diagnostics = vec![
            Diagnostic::located("a.js", 1, 2, "X"),
            Diagnostic::message("Y"),
        ];
        assert_eq!(render_diagnostics(&diagnostics), "a.js:1:2\nX\n\nY");
    }

    #[test]
    fn test_render_preserves_order() {
        let diagnostics = vec![
            Diagnostic::located("b.js", 9, 0, "second file first"),
            Diagnostic::located("a.js", 1, 1, "first file second"),
        ];
        let rendered = render_diagnostics(&diagnostics);
        let b = rendered.find("b.js").unwrap();
        let a = rendered.find("a.js").unwrap();
        assert!(b < a);
        assert_eq!(rendered, render_diagnostics(&diagnostics));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_diagnostics(&[]), "");
    }

    #[test]
    fn test_location_partial() {
        let diag = Diagnostic {
            file: Some("main.jsx".to_string()),
            line: Some(4),
            column: None,
            message: "oops".to_string(),
        };
        assert_eq!(diag.location().as_deref(), Some("main.jsx:4"));
        assert_eq!(diag.to_string(), "main.jsx:4\noops");

        let no_file = Diagnostic {
            file: None,
            line: Some(4),
            column: Some(2),
            message: "oops".to_string(),
        };
        assert_eq!(no_file.location(), None);
        assert_eq!(no_file.to_string(), "oops");
    }
}
