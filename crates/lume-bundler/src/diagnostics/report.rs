//! Miette diagnostic conversion for terminal reporting.
//!
//! When the referenced source file is readable, the report carries the
//! source and a label at the reported position; otherwise it degrades to the
//! plain message.

use crate::diagnostics::Diagnostic;
use miette::{NamedSource, SourceSpan};
use std::path::Path;

/// A [`Diagnostic`] ready to be rendered by miette.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(lume::build))]
pub struct DiagnosticError {
    message: String,
    #[source_code]
    source_code: Option<NamedSource<String>>,
    #[label("here")]
    span: Option<SourceSpan>,
}

/// Convert a diagnostic into a miette-renderable error.
///
/// `cwd` resolves relative file paths as reported by the compiler.
pub fn to_diagnostic_error(diagnostic: &Diagnostic, cwd: &Path) -> DiagnosticError {
    let message = match diagnostic.location() {
        Some(loc) => format!("{loc}: {}", diagnostic.message),
        None => diagnostic.message.clone(),
    };

    let located = diagnostic.file.as_deref().and_then(|file| {
        let source = std::fs::read_to_string(cwd.join(file)).ok()?;
        let offset = line_col_to_offset(&source, diagnostic.line?, diagnostic.column.unwrap_or(0))?;
        Some((NamedSource::new(file, source), SourceSpan::from((offset, 1))))
    });

    match located {
        Some((source, span)) => DiagnosticError {
            message,
            source_code: Some(source),
            span: Some(span),
        },
        None => DiagnosticError {
            message,
            source_code: None,
            span: None,
        },
    }
}

/// Convert a 1-based line and 0-based column to a byte offset.
pub(crate) fn line_col_to_offset(source: &str, line: u32, column: u32) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let mut offset = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line as usize {
            let col = text
                .char_indices()
                .nth(column as usize)
                .map(|(pos, _)| pos)
                .unwrap_or(text.trim_end_matches('\n').len());
            return Some(offset + col);
        }
        offset += text.len();
    }
    None
}
