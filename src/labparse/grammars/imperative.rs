//! Imperative language
//!
//! Constants, variables, assignments, `do { ... } while (...)` loops, one-dimensional indexing
//! and empty array initializers. Every statement ends with `;`. Identifiers are single letters
//! (or `_`), so `ab` is two identifiers and `x1` an identifier followed by a number.
//!
//! ```text
//! program      := statement*
//! statement    := const-init ';' | var-init ';' | var-assign ';' | do-while ';'
//! const-init   := 'const' primary ':=' number
//! var-init     := 'var' identifier ':=' (expression | array-init)
//! var-assign   := primary ':=' (expression | array-init)
//! array-init   := '[' ']'
//! do-while     := 'do' block 'while' '(' expression ')'
//! block        := '{' statement* '}'
//! expression   := unary assign-tail
//! assign-tail  := or-tail (':=' unary or-tail)*
//! or-tail      := and-tail ('||' unary and-tail)*
//! and-tail     := eq-tail ('&&' unary eq-tail)*
//! eq-tail      := rel-tail (('==' | '!=') unary rel-tail)*
//! rel-tail     := add-tail (relop unary add-tail)*
//! add-tail     := mul-tail (('+' | '-') no-double-neg unary mul-tail)*
//! mul-tail     := (('*' | '/') unary)*
//! unary        := ['-' no-double-neg] (primary | number | '(' expression ')' | '!' expression)
//! primary      := identifier ['[' expression ']']
//! ```
//!
//! Keywords sit before the identifier pattern in the table, so they are recognized even as the
//! start of a longer word: `done` scans as `Do` followed by the identifiers `n` and `e`. Likewise `!` is
//! listed before `!=`, which leaves `!=` unreachable from source text.

use crate::labparse::error::GrammarError;
use crate::labparse::lexing::{PatternTable, TokenKind};
use crate::labparse::parsing::grammar::{
    advance, arm, call, choice, expect, forbid, operator_tail, optional, production, repeat,
    Grammar, Rule,
};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImperativeToken {
    Eof,
    Ignore,
    Const,
    Var,
    Do,
    While,
    Or,
    And,
    Not,
    Terminator,
    Identifier,
    Number,
    BlockBegin,
    BlockEnd,
    IndexerBegin,
    IndexerEnd,
    ParBegin,
    ParEnd,
    RelOp,
    Eq,
    Ne,
    Assign,
    Add,
    Sub,
    Mul,
    Div,
}

impl TokenKind for ImperativeToken {
    const EOF: Self = ImperativeToken::Eof;
    const IGNORE: Self = ImperativeToken::Ignore;
}

impl fmt::Display for ImperativeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Message raised when a unary minus directly follows another minus.
pub const DOUBLE_NEGATION: &str = "Unexpected double negation '-'";

/// Scanner patterns in priority order.
pub const PATTERNS: &[(ImperativeToken, &str)] = &[
    (ImperativeToken::Ignore, r"[ \r\n\t]+"),
    (ImperativeToken::Const, "const"),
    (ImperativeToken::Var, "var"),
    (ImperativeToken::Do, "do"),
    (ImperativeToken::While, "while"),
    (ImperativeToken::Or, r"\|\|"),
    (ImperativeToken::And, "&&"),
    (ImperativeToken::Not, "!"),
    (ImperativeToken::Terminator, ";"),
    (ImperativeToken::Identifier, "[A-Za-z_]"),
    (
        ImperativeToken::Number,
        r"(?:[1-9][0-9]*|0)\.[0-9]+|[1-9][0-9]*|0",
    ),
    (ImperativeToken::BlockBegin, r"\{"),
    (ImperativeToken::BlockEnd, r"\}"),
    (ImperativeToken::IndexerBegin, r"\["),
    (ImperativeToken::IndexerEnd, r"\]"),
    (ImperativeToken::ParBegin, r"\("),
    (ImperativeToken::ParEnd, r"\)"),
    (ImperativeToken::RelOp, ">=|<=|>|<"),
    (ImperativeToken::Eq, "=="),
    (ImperativeToken::Ne, "!="),
    (ImperativeToken::Assign, ":="),
    (ImperativeToken::Add, r"\+"),
    (ImperativeToken::Sub, "-"),
    (ImperativeToken::Mul, r"\*"),
    (ImperativeToken::Div, "/"),
];

const STATEMENT_START: &[ImperativeToken] = &[
    ImperativeToken::Identifier,
    ImperativeToken::Const,
    ImperativeToken::Var,
    ImperativeToken::Do,
];

const EXPRESSION_START: &[ImperativeToken] = &[
    ImperativeToken::Identifier,
    ImperativeToken::Not,
    ImperativeToken::Number,
    ImperativeToken::Sub,
    ImperativeToken::ParBegin,
];

static PATTERN_TABLE: Lazy<PatternTable<ImperativeToken>> = Lazy::new(|| {
    PatternTable::new(PATTERNS).expect("imperative pattern table compiles")
});

static GRAMMAR: Lazy<Grammar<ImperativeToken>> =
    Lazy::new(|| build_grammar().expect("imperative grammar is complete"));

pub fn pattern_table() -> &'static PatternTable<ImperativeToken> {
    &PATTERN_TABLE
}

pub fn grammar() -> &'static Grammar<ImperativeToken> {
    &GRAMMAR
}

/// Right-hand side of a declaration or assignment: an expression or `[]`.
fn initializer(name: &'static str) -> Rule<ImperativeToken> {
    choice(
        name,
        vec![
            arm(EXPRESSION_START, vec![call("expression")]),
            arm(&[ImperativeToken::IndexerBegin], vec![call("array_init")]),
        ],
    )
}

fn no_double_negation() -> Rule<ImperativeToken> {
    forbid(&[ImperativeToken::Sub], DOUBLE_NEGATION)
}

pub fn build_grammar() -> Result<Grammar<ImperativeToken>, GrammarError> {
    use ImperativeToken::*;

    Grammar::new(
        "program",
        vec![
            production(
                "program",
                vec![repeat(STATEMENT_START, vec![call("statement")])],
            ),
            production(
                "statement",
                vec![choice(
                    "Statement",
                    vec![
                        arm(&[Const], vec![call("const_init"), expect(Terminator)]),
                        arm(&[Var], vec![call("var_init"), expect(Terminator)]),
                        arm(&[Identifier], vec![call("var_assign"), expect(Terminator)]),
                        arm(&[Do], vec![call("do_while"), expect(Terminator)]),
                    ],
                )],
            ),
            production(
                "const_init",
                vec![
                    expect(Const),
                    call("primary"),
                    expect(Assign),
                    expect(Number),
                ],
            ),
            production(
                "var_init",
                vec![
                    expect(Var),
                    expect(Identifier),
                    expect(Assign),
                    initializer("Var initialization"),
                ],
            ),
            production(
                "var_assign",
                vec![
                    call("primary"),
                    expect(Assign),
                    initializer("Var assignment"),
                ],
            ),
            production("array_init", vec![expect(IndexerBegin), expect(IndexerEnd)]),
            production(
                "do_while",
                vec![
                    expect(Do),
                    call("block"),
                    expect(While),
                    expect(ParBegin),
                    call("expression"),
                    expect(ParEnd),
                ],
            ),
            production(
                "block",
                vec![
                    expect(BlockBegin),
                    repeat(STATEMENT_START, vec![call("statement")]),
                    expect(BlockEnd),
                ],
            ),
            production("expression", vec![call("unary"), call("assign_tail")]),
            operator_tail("assign_tail", &[Assign], "unary", "or_tail"),
            operator_tail("or_tail", &[Or], "unary", "and_tail"),
            operator_tail("and_tail", &[And], "unary", "equality_tail"),
            operator_tail("equality_tail", &[Eq, Ne], "unary", "relational_tail"),
            operator_tail("relational_tail", &[RelOp], "unary", "additive_tail"),
            production(
                "additive_tail",
                vec![
                    call("multiplicative_tail"),
                    repeat(
                        &[Add, Sub],
                        vec![
                            advance(),
                            no_double_negation(),
                            call("unary"),
                            call("multiplicative_tail"),
                        ],
                    ),
                ],
            ),
            production(
                "multiplicative_tail",
                vec![repeat(&[Mul, Div], vec![advance(), call("unary")])],
            ),
            production(
                "unary",
                vec![
                    optional(&[Sub], vec![advance(), no_double_negation()]),
                    choice(
                        "Unary",
                        vec![
                            arm(&[Identifier], vec![call("primary")]),
                            arm(&[Number], vec![advance()]),
                            arm(
                                &[ParBegin],
                                vec![advance(), call("expression"), expect(ParEnd)],
                            ),
                            arm(&[Not], vec![advance(), call("expression")]),
                        ],
                    ),
                ],
            ),
            production(
                "primary",
                vec![
                    expect(Identifier),
                    optional(&[IndexerBegin], vec![call("indexer")]),
                ],
            ),
            production(
                "indexer",
                vec![expect(IndexerBegin), call("expression"), expect(IndexerEnd)],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labparse::lexing::scan;
    use ImperativeToken::*;

    fn kinds(source: &str) -> Vec<ImperativeToken> {
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
        assert_eq!(grammar().start(), "program");
    }

    #[test]
    fn test_keyword_prefix_wins_over_identifier() {
        assert_eq!(kinds("done"), vec![Do, Identifier, Identifier, Eof]);
        assert_eq!(kinds("vars"), vec![Var, Identifier, Eof]);
        assert_eq!(kinds("dw"), vec![Identifier, Identifier, Eof]);
    }

    #[test]
    fn test_identifiers_are_single_letters() {
        assert_eq!(kinds("ab"), vec![Identifier, Identifier, Eof]);
        assert_eq!(kinds("x1 := 1;"), vec![Identifier, Number, Assign, Number, Terminator, Eof]);
        let tokens = scan(pattern_table(), "_q").unwrap();
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["_", "q", ""]);
    }

    #[test]
    fn test_relational_operators_prefer_two_characters() {
        assert_eq!(kinds("a >= b <= c > d"), vec![
            Identifier, RelOp, Identifier, RelOp, Identifier, RelOp, Identifier, Eof
        ]);
    }

    #[test]
    fn test_numbers() {
        let tokens = scan(pattern_table(), "0 12 3.25 007").unwrap();
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["0", "12", "3.25", "0", "0", "7", ""]);
    }

    #[test]
    fn test_not_equal_is_shadowed_by_not() {
        let err = scan(pattern_table(), "a != b").unwrap_err();
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn test_all_operators() {
        assert_eq!(
            kinds("|| && ! == := + - * / { } [ ] ( ) ;"),
            vec![
                Or, And, Not, Eq, Assign, Add, Sub, Mul, Div, BlockBegin, BlockEnd, IndexerBegin,
                IndexerEnd, ParBegin, ParEnd, Terminator, Eof
            ]
        );
    }
}
