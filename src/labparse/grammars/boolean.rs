//! Boolean expression language
//!
//! A `;`-separated list of assignments whose right-hand sides combine identifiers and
//! (hexadecimal-tailed) numbers with `not`, `and`, `xor`, `or` and relational operators.
//!
//! ```text
//! program      := [statement (';' [statement])*]
//! statement    := identifier ':=' expression
//! expression   := unary assign-tail
//! assign-tail  := or-tail (':=' unary or-tail)*
//! or-tail      := xor-tail ('or' unary xor-tail)*
//! xor-tail     := and-tail ('xor' unary and-tail)*
//! and-tail     := rel-tail ('and' unary rel-tail)*
//! rel-tail     := (relop unary)*
//! unary        := identifier | number | '(' expression ')' | 'not' expression
//! ```
//!
//! The statement after a `;` may be omitted, so a trailing `;` is accepted.

use crate::labparse::error::GrammarError;
use crate::labparse::lexing::{PatternTable, TokenKind};
use crate::labparse::parsing::grammar::{
    advance, arm, call, choice, expect, operator_tail, optional, production, repeat, Grammar,
};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BooleanToken {
    Eof,
    Ignore,
    Identifier,
    Number,
    RelOp,
    And,
    Or,
    Xor,
    Not,
    Assign,
    Terminator,
    ParBegin,
    ParEnd,
}

impl TokenKind for BooleanToken {
    const EOF: Self = BooleanToken::Eof;
    const IGNORE: Self = BooleanToken::Ignore;
}

impl fmt::Display for BooleanToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Scanner patterns in priority order.
pub const PATTERNS: &[(BooleanToken, &str)] = &[
    (BooleanToken::Ignore, r"[ \r\n\t]+"),
    (BooleanToken::Or, "or"),
    (BooleanToken::Xor, "xor"),
    (BooleanToken::And, "and"),
    (BooleanToken::Not, "not"),
    (BooleanToken::Terminator, ";"),
    (BooleanToken::Identifier, "[A-Za-z_][A-Za-z0-9_]*"),
    (BooleanToken::Number, "[0-9][0-9a-f]*"),
    (BooleanToken::ParBegin, r"\("),
    (BooleanToken::ParEnd, r"\)"),
    (BooleanToken::RelOp, ">=|<=|>|<"),
    (BooleanToken::Assign, ":="),
];

static PATTERN_TABLE: Lazy<PatternTable<BooleanToken>> =
    Lazy::new(|| PatternTable::new(PATTERNS).expect("boolean pattern table compiles"));

static GRAMMAR: Lazy<Grammar<BooleanToken>> =
    Lazy::new(|| build_grammar().expect("boolean grammar is complete"));

pub fn pattern_table() -> &'static PatternTable<BooleanToken> {
    &PATTERN_TABLE
}

pub fn grammar() -> &'static Grammar<BooleanToken> {
    &GRAMMAR
}

pub fn build_grammar() -> Result<Grammar<BooleanToken>, GrammarError> {
    use BooleanToken::*;

    Grammar::new(
        "program",
        vec![
            production(
                "program",
                vec![optional(
                    &[Identifier],
                    vec![
                        call("statement"),
                        repeat(
                            &[Terminator],
                            vec![advance(), optional(&[Identifier], vec![call("statement")])],
                        ),
                    ],
                )],
            ),
            production(
                "statement",
                vec![expect(Identifier), expect(Assign), call("expression")],
            ),
            production("expression", vec![call("unary"), call("assign_tail")]),
            operator_tail("assign_tail", &[Assign], "unary", "or_tail"),
            operator_tail("or_tail", &[Or], "unary", "xor_tail"),
            operator_tail("xor_tail", &[Xor], "unary", "and_tail"),
            operator_tail("and_tail", &[And], "unary", "relational_tail"),
            production(
                "relational_tail",
                vec![repeat(&[RelOp], vec![advance(), call("unary")])],
            ),
            production(
                "unary",
                vec![choice(
                    "Unary",
                    vec![
                        arm(&[Identifier, Number], vec![advance()]),
                        arm(
                            &[ParBegin],
                            vec![advance(), call("expression"), expect(ParEnd)],
                        ),
                        arm(&[Not], vec![advance(), call("expression")]),
                    ],
                )],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labparse::lexing::scan;
    use BooleanToken::*;

    fn kinds(source: &str) -> Vec<BooleanToken> {
        scan(pattern_table(), source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tables_build() {
        assert_eq!(pattern_table().len(), PATTERNS.len());
        assert!(build_grammar().is_ok());
        assert_eq!(grammar().productions().count(), 9);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("a := not b xor c or d and e"),
            vec![Identifier, Assign, Not, Identifier, Xor, Identifier, Or, Identifier, And, Identifier, Eof]
        );
        // `or` is tried first, even inside a longer word
        assert_eq!(kinds("order"), vec![Or, Identifier, Eof]);
    }

    #[test]
    fn test_numbers_take_hex_tail() {
        let tokens = scan(pattern_table(), "0ff 9a").unwrap();
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["0ff", "9a", ""]);
    }

    #[test]
    fn test_unknown_character_is_fatal() {
        let err = scan(pattern_table(), "a := b + c").unwrap_err();
        assert_eq!((err.line, err.column, err.offset), (1, 7, 7));
    }
}
