//! Streaming scanner
//!
//! [`Scanner`] is an iterator over `Result<Token, LexError>`. The parser pulls from it one token
//! at a time, so a source is never materialized as a token list unless the caller collects it.
//!
//! The stream always ends with exactly one of:
//! - the end-of-input token, positioned at the end of the text
//! - a [`LexError`] at the first offset no pattern matches
//!
//! and yields nothing afterwards.

use super::patterns::PatternTable;
use super::position::{LineCounting, LineIndex};
use super::tokens::{Token, TokenKind};
use crate::labparse::error::LexError;

pub struct Scanner<'t, 's, K> {
    table: &'t PatternTable<K>,
    source: &'s str,
    offset: usize,
    index: LineIndex,
    emitted: usize,
    finished: bool,
}

impl<'t, 's, K: TokenKind> Scanner<'t, 's, K> {
    pub fn new(table: &'t PatternTable<K>, source: &'s str) -> Self {
        Self {
            table,
            source,
            offset: 0,
            index: LineIndex::new(LineCounting::default()),
            emitted: 0,
            finished: false,
        }
    }

    /// Use `counting` for the positions of every token produced from here on.
    ///
    /// Meant to be called before the first token is pulled.
    pub fn with_line_counting(mut self, counting: LineCounting) -> Self {
        let mut index = LineIndex::new(counting);
        index.advance(&self.source[..self.offset]);
        self.index = index;
        self
    }

    /// Byte offset of the scan cursor.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn finish(&mut self) {
        self.finished = true;
        tracing::debug!(tokens = self.emitted, bytes = self.offset, "scan finished");
    }
}

impl<'t, 's, K: TokenKind> Iterator for Scanner<'t, 's, K> {
    type Item = Result<Token<K>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if self.offset >= self.source.len() {
                let end = self.index.position();
                self.emitted += 1;
                self.finish();
                return Some(Ok(Token::end_of_input(end.line, end.column)));
            }

            let rest = &self.source[self.offset..];
            let Some((kind, len)) = self.table.match_prefix(rest) else {
                let at = self.index.position();
                let error = LexError::new(at.line, at.column, self.offset);
                tracing::debug!(offset = self.offset, %error, "no pattern matches");
                self.finish();
                return Some(Err(error));
            };

            let lexeme = &rest[..len];
            self.offset += len;
            self.index.advance(lexeme);

            if kind == K::IGNORE {
                continue;
            }

            let end = self.index.position();
            self.emitted += 1;
            return Some(Ok(Token::new(kind, lexeme, end.line, end.column)));
        }
    }
}
