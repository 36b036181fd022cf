//! Language selection
//!
//! [`Language`] is the entry point most callers need: it picks the pattern table and grammar of
//! one language and runs the scanner and parser over a source text.

use crate::labparse::error::LexError;
use crate::labparse::grammars::{boolean, imperative};
use crate::labparse::lexing::{LineCounting, PatternTable, Scanner, TokenKind, TokenRecord};
use crate::labparse::parsing::{parse_tokens, Diagnostic, Grammar, Parser};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    /// Declarations, assignments, do-while loops and arrays.
    Imperative,
    /// Assignments of boolean and relational expressions.
    Boolean,
}

/// Tokens and diagnostics of one source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub language: Language,
    pub tokens: Vec<TokenRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    /// True when the parser reported nothing.
    pub fn is_accepted(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Imperative, Language::Boolean];

    pub fn name(self) -> &'static str {
        match self {
            Language::Imperative => "imperative",
            Language::Boolean => "boolean",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Language::Imperative => "const/var declarations, assignments, do-while loops, arrays",
            Language::Boolean => "assignments of not/and/xor/or and relational expressions",
        }
    }

    /// Scan `source` with reference line counting.
    pub fn tokenize(self, source: &str) -> Result<Vec<TokenRecord>, LexError> {
        self.tokenize_with(source, LineCounting::default())
    }

    pub fn tokenize_with(
        self,
        source: &str,
        counting: LineCounting,
    ) -> Result<Vec<TokenRecord>, LexError> {
        match self {
            Language::Imperative => scan_records(imperative::pattern_table(), source, counting),
            Language::Boolean => scan_records(boolean::pattern_table(), source, counting),
        }
    }

    /// Scan and parse `source`, streaming tokens into the parser.
    pub fn check(self, source: &str) -> Result<Vec<Diagnostic>, LexError> {
        self.check_with(source, LineCounting::default())
    }

    pub fn check_with(
        self,
        source: &str,
        counting: LineCounting,
    ) -> Result<Vec<Diagnostic>, LexError> {
        match self {
            Language::Imperative => stream_check(
                imperative::pattern_table(),
                imperative::grammar(),
                source,
                counting,
            ),
            Language::Boolean => {
                stream_check(boolean::pattern_table(), boolean::grammar(), source, counting)
            }
        }
    }

    /// Scan once, keep the tokens for reporting, and parse them.
    pub fn analyze(self, source: &str, counting: LineCounting) -> Result<Analysis, LexError> {
        let (tokens, diagnostics) = match self {
            Language::Imperative => collect_and_check(
                imperative::pattern_table(),
                imperative::grammar(),
                source,
                counting,
            )?,
            Language::Boolean => {
                collect_and_check(boolean::pattern_table(), boolean::grammar(), source, counting)?
            }
        };
        Ok(Analysis {
            language: self,
            tokens,
            diagnostics,
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn scan_records<K: TokenKind>(
    table: &PatternTable<K>,
    source: &str,
    counting: LineCounting,
) -> Result<Vec<TokenRecord>, LexError> {
    Scanner::new(table, source)
        .with_line_counting(counting)
        .map(|token| token.map(|t| t.to_record()))
        .collect()
}

fn stream_check<K: TokenKind>(
    table: &PatternTable<K>,
    grammar: &Grammar<K>,
    source: &str,
    counting: LineCounting,
) -> Result<Vec<Diagnostic>, LexError> {
    let scanner = Scanner::new(table, source).with_line_counting(counting);
    Parser::new(grammar, scanner).parse()
}

fn collect_and_check<K: TokenKind>(
    table: &PatternTable<K>,
    grammar: &Grammar<K>,
    source: &str,
    counting: LineCounting,
) -> Result<(Vec<TokenRecord>, Vec<Diagnostic>), LexError> {
    let tokens = Scanner::new(table, source)
        .with_line_counting(counting)
        .collect::<Result<Vec<_>, _>>()?;
    let records = tokens.iter().map(|t| t.to_record()).collect();
    Ok((records, parse_tokens(grammar, tokens)))
}
