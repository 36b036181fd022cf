//! Lexer
//!
//! Turns source text into a stream of classified tokens.
//!
//! Structure:
//!     Every language provides an ordered [`PatternTable`]: a list of (kind, regex) pairs.
//!     At each offset the [`Scanner`] tries the patterns in table order and takes the first
//!     one matching a non-empty prefix. Order is priority, not match length: a keyword listed
//!     before the identifier pattern wins even inside a longer word, and `>=` must be listed
//!     before `>`.
//!
//!     Whitespace is recognized by the table's ignorable kind and dropped. End of input is an
//!     explicit cursor check that emits one synthetic end token, never a pattern match.
//!
//! Positions
//!
//!     Each token carries the line and column of its END offset. See [`position`] for the
//!     exact counting rules.

pub mod patterns;
pub mod position;
pub mod scanner;
pub mod tokens;

pub use patterns::PatternTable;
pub use position::{LineCounting, LineIndex, Position};
pub use scanner::Scanner;
pub use tokens::{Token, TokenKind, TokenRecord};

use crate::labparse::error::LexError;

/// Scan the whole source into a token vector ending with the end-of-input token.
///
/// Stops at the first lexical error.
pub fn scan<K: TokenKind>(table: &PatternTable<K>, source: &str) -> Result<Vec<Token<K>>, LexError> {
    Scanner::new(table, source).collect()
}
