//! Token types shared by every language.
//!
//!     A language defines its own closed enumeration of terminal categories and implements
//!     [`TokenKind`] for it. The scanner and the parser engine are generic over that kind, so
//!     a [`Token`] is always tied to exactly one language.
//!
//!     The display name of a kind is its variant name. It appears verbatim in diagnostics
//!     (`Expected Terminator but got 'Eof'`) and in scanner output (`Identifier(x)`).

use serde::Serialize;
use std::fmt;

/// A closed set of terminal categories for one language.
pub trait TokenKind: Copy + Eq + fmt::Debug + fmt::Display + Serialize + 'static {
    /// The synthetic kind appended once the whole input is consumed.
    const EOF: Self;

    /// Matches of this kind (whitespace) are consumed but never emitted.
    const IGNORE: Self;
}

/// A classified piece of source text.
///
/// `line` and `column` locate the END of the lexeme, which is where diagnostics point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<K> {
    pub kind: K,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl<K: TokenKind> Token<K> {
    pub fn new(kind: K, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// The end-of-input token: empty lexeme, positioned at the end of the text.
    pub fn end_of_input(line: usize, column: usize) -> Self {
        Self::new(K::EOF, String::new(), line, column)
    }

    pub fn is_end(&self) -> bool {
        self.kind == K::EOF
    }

    /// Drop the language type, keeping the kind as its display name.
    pub fn to_record(&self) -> TokenRecord {
        TokenRecord {
            kind: self.kind.to_string(),
            lexeme: self.lexeme.clone(),
            line: self.line,
            column: self.column,
        }
    }
}

impl<K: TokenKind> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.lexeme)
    }
}

/// Language-independent copy of a token, used for reports and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    pub kind: String,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for TokenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.lexeme)
    }
}
