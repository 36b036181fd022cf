//! Ordered pattern tables
//!
//! A table is a list, not a set: patterns are tried in declaration order and the first one
//! matching a non-empty prefix wins. Every pattern is anchored at the scan cursor when the table
//! is built, so entries are written without `^`.

use super::tokens::TokenKind;
use crate::labparse::error::PatternError;
use regex::Regex;

/// Ordered (kind, regex) pairs for one language.
#[derive(Debug, Clone)]
pub struct PatternTable<K> {
    entries: Vec<(K, Regex)>,
}

impl<K: TokenKind> PatternTable<K> {
    /// Compile a table from (kind, pattern) pairs, keeping their order.
    pub fn new(entries: &[(K, &str)]) -> Result<Self, PatternError> {
        let entries = entries
            .iter()
            .map(|&(kind, pattern)| {
                Regex::new(&format!("^(?:{})", pattern))
                    .map(|regex| (kind, regex))
                    .map_err(|source| PatternError {
                        kind: kind.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// First entry matching a non-empty prefix of `rest`, with the match length in bytes.
    ///
    /// Empty matches are skipped: a pattern that can match nothing must never stall the scanner.
    pub fn match_prefix(&self, rest: &str) -> Option<(K, usize)> {
        self.entries.iter().find_map(|(kind, regex)| {
            regex
                .find(rest)
                .filter(|m| !m.is_empty())
                .map(|m| (*kind, m.end()))
        })
    }

    pub fn kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
