//! Transform errors
//!
//! Every failure carries the source identity plus a 1-based line and column,
//! computed from the byte offset where the problem was detected.

use thiserror::Error;

/// What went wrong while transforming a source file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformErrorKind {
    /// The parser rejected the source; holds its message
    #[error("{0}")]
    Syntax(String),

    #[error("Cannot emit code: {0}")]
    Emit(String),
}

/// A transform failure, located in the source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{sourcefile}:{line}:{column}: {kind}")]
pub struct TransformError {
    pub kind: TransformErrorKind,
    pub sourcefile: String,
    /// 1-based
    pub line: usize,
    /// 1-based, counted in characters
    pub column: usize,
}

impl TransformError {
    /// Locate `offset` in `source` and build the error
    pub fn at(kind: TransformErrorKind, sourcefile: &str, source: &str, offset: usize) -> Self {
        let (line, column) = line_column(source, offset);
        Self {
            kind,
            sourcefile: sourcefile.to_string(),
            line,
            column,
        }
    }
}

fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
