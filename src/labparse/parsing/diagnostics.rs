//! Syntax diagnostics
//!
//! A diagnostic points at the lookahead token that was current when the problem was detected,
//! using that token's (end) position.

use serde::Serialize;
use std::fmt;

/// What kind of rule raised the diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// A specific terminal was required.
    Expected,
    /// No alternative of a production accepts the lookahead.
    InvalidProduction,
    /// The lookahead is explicitly ruled out (e.g. a second unary minus).
    Forbidden,
}

/// A recoverable syntax complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            code,
            message: message.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, col {}.",
            self.message, self.line, self.column
        )
    }
}
