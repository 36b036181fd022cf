//! Error types for scanning and table construction
//!
//! Syntax problems are not errors here: the parser records them as
//! [`Diagnostic`](crate::labparse::parsing::Diagnostic)s and keeps going.
//! Only a lexical failure stops processing.

use serde::Serialize;
use thiserror::Error;

/// No pattern of the table matched a non-empty prefix at `offset`.
///
/// Fatal: the token stream ends here and nothing downstream runs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Unexpected token, line {line}, column {column}.")]
pub struct LexError {
    pub line: usize,
    pub column: usize,
    /// Byte offset of the first unmatched character.
    pub offset: usize,
}

impl LexError {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A pattern table entry that is not a valid regular expression.
#[derive(Debug, Error)]
#[error("invalid pattern for {kind}: {source}")]
pub struct PatternError {
    pub kind: String,
    #[source]
    pub source: regex::Error,
}

/// Structural problems found while assembling a grammar table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("production '{0}' is defined more than once")]
    DuplicateProduction(&'static str),

    #[error("production '{caller}' calls undefined production '{callee}'")]
    UndefinedProduction {
        caller: &'static str,
        callee: &'static str,
    },

    #[error("start production '{0}' is not defined")]
    MissingStart(&'static str),
}
