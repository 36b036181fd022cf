//! Predictive-descent engine
//!
//! Interprets a [`Grammar`] over a token stream with one token of lookahead. The only mutable
//! state is the cursor (current token, suppression counter) and the diagnostic list; a `Parser`
//! is built for one stream and consumed by [`Parser::parse`].
//!
//! The stream is pulled lazily. If it yields a [`LexError`], the engine swaps in an end-of-input
//! token at the error position so every rule winds down without consuming anything else, and
//! `parse` returns the lexical error instead of the diagnostics gathered so far. Input left
//! unread when the grammar stops early is still scanned to its end for the same reason.

use super::diagnostics::{Diagnostic, DiagnosticCode};
use super::grammar::{Grammar, Rule};
use crate::labparse::error::LexError;
use crate::labparse::lexing::{Token, TokenKind};

/// Number of consumed tokens a new diagnostic must exceed to be recorded.
pub const SUPPRESSION_WINDOW: usize = 2;

pub struct Parser<'g, K: TokenKind, I> {
    grammar: &'g Grammar<K>,
    tokens: I,
    current: Token<K>,
    tokens_since_last_error: usize,
    consumed: usize,
    diagnostics: Vec<Diagnostic>,
    fatal: Option<LexError>,
}

/// Parse an already scanned token sequence. Infallible: syntax problems become diagnostics.
pub fn parse_tokens<K, T>(grammar: &Grammar<K>, tokens: T) -> Vec<Diagnostic>
where
    K: TokenKind,
    T: IntoIterator<Item = Token<K>>,
{
    let mut parser = Parser::new(grammar, tokens.into_iter().map(Ok));
    parser.run();
    parser.diagnostics
}

impl<'g, K, I> Parser<'g, K, I>
where
    K: TokenKind,
    I: Iterator<Item = Result<Token<K>, LexError>>,
{
    pub fn new(grammar: &'g Grammar<K>, tokens: I) -> Self {
        Self {
            grammar,
            tokens,
            current: Token::end_of_input(1, 1),
            tokens_since_last_error: 0,
            consumed: 0,
            diagnostics: Vec::new(),
            fatal: None,
        }
    }

    /// Run the grammar's start production followed by end of input.
    pub fn parse(mut self) -> Result<Vec<Diagnostic>, LexError> {
        self.run();
        match self.fatal {
            Some(error) => Err(error),
            None => Ok(self.diagnostics),
        }
    }

    fn run(&mut self) {
        self.advance();
        self.call(self.grammar.start());
        self.expect(K::EOF);
        // a stalled parse leaves input unread; a lexical error in it is still fatal
        if self.fatal.is_none() {
            self.fatal = self.tokens.by_ref().find_map(Result::err);
        }
        tracing::debug!(
            start = self.grammar.start(),
            consumed = self.consumed,
            diagnostics = self.diagnostics.len(),
            "parse finished"
        );
    }

    fn call(&mut self, name: &str) {
        let grammar = self.grammar;
        if let Some(production) = grammar.production(name) {
            self.run_rules(&production.body);
        }
    }

    fn run_rules(&mut self, rules: &'g [Rule<K>]) {
        for rule in rules {
            self.run_rule(rule);
        }
    }

    fn run_rule(&mut self, rule: &'g Rule<K>) {
        match rule {
            Rule::Expect(kind) => self.expect(*kind),
            Rule::Advance => self.advance(),
            Rule::Call(name) => self.call(name),
            Rule::Repeat { lookahead, body } => {
                while self.at(lookahead) {
                    let before = self.consumed;
                    self.run_rules(body);
                    // a pass that consumed nothing would repeat forever
                    if self.consumed == before {
                        break;
                    }
                }
            }
            Rule::Optional { lookahead, body } => {
                if self.at(lookahead) {
                    self.run_rules(body);
                }
            }
            Rule::Choice { name, arms } => {
                match arms.iter().find(|arm| self.at(arm.lookahead)) {
                    Some(arm) => self.run_rules(&arm.body),
                    None => self.raise(
                        DiagnosticCode::InvalidProduction,
                        format!("Production '{}' is invalid", name),
                    ),
                }
            }
            Rule::Forbid { lookahead, message } => {
                if self.at(lookahead) {
                    self.raise(DiagnosticCode::Forbidden, *message);
                }
            }
        }
    }

    fn at(&self, lookahead: &[K]) -> bool {
        lookahead.contains(&self.current.kind)
    }

    /// Pull the next token. At the end of the stream the last token stays current.
    fn advance(&mut self) {
        if self.fatal.is_some() {
            return;
        }
        match self.tokens.next() {
            Some(Ok(token)) => {
                self.tokens_since_last_error += 1;
                self.consumed += 1;
                self.current = token;
            }
            Some(Err(error)) => {
                self.current = Token::end_of_input(error.line, error.column);
                self.fatal = Some(error);
            }
            None => {}
        }
    }

    fn expect(&mut self, kind: K) {
        if self.current.kind == kind {
            self.advance();
        } else {
            let message = format!("Expected {} but got '{}'", kind, self.current.kind);
            self.raise(DiagnosticCode::Expected, message);
        }
    }

    fn raise(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        let message = message.into();
        if self.tokens_since_last_error > SUPPRESSION_WINDOW {
            let diagnostic = Diagnostic::new(code, message, self.current.line, self.current.column);
            tracing::trace!(%diagnostic, "diagnostic recorded");
            self.diagnostics.push(diagnostic);
        } else {
            tracing::trace!(
                %message,
                since_last = self.tokens_since_last_error,
                "diagnostic suppressed"
            );
        }
        self.tokens_since_last_error = 0;
    }

    pub fn current(&self) -> &Token<K> {
        &self.current
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labparse::grammars::boolean::BooleanToken::{self, *};
    use crate::labparse::parsing::grammar::{
        advance, arm, call, choice, expect, forbid, production, repeat,
    };

    /// list := item* ; item := Identifier ':=' Number ';'
    fn list_grammar() -> Grammar<BooleanToken> {
        Grammar::new(
            "list",
            vec![
                production("list", vec![repeat(&[Identifier], vec![call("item")])]),
                production(
                    "item",
                    vec![
                        expect(Identifier),
                        expect(Assign),
                        choice("Value", vec![arm(&[Number], vec![advance()])]),
                        expect(Terminator),
                    ],
                ),
            ],
        )
        .unwrap()
    }

    fn tokens(kinds: &[BooleanToken]) -> Vec<Token<BooleanToken>> {
        kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| Token::new(kind, "", 1, i + 1))
            .chain(std::iter::once(Token::end_of_input(1, kinds.len() + 1)))
            .collect()
    }

    #[test]
    fn test_accepts_valid_sequence() {
        let diagnostics = parse_tokens(
            &list_grammar(),
            tokens(&[Identifier, Assign, Number, Terminator, Identifier, Assign, Number, Terminator]),
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_expectation_failure_message_and_position() {
        let diagnostics = parse_tokens(
            &list_grammar(),
            tokens(&[Identifier, Assign, Number, Identifier]),
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::new(
                DiagnosticCode::Expected,
                "Expected Terminator but got 'Identifier'",
                1,
                4
            )]
        );
    }

    #[test]
    fn test_invalid_choice_does_not_advance() {
        // the bad `Identifier` is left in place, so the terminator check fails on it too,
        // but that second complaint falls inside the suppression window
        let diagnostics = parse_tokens(
            &list_grammar(),
            tokens(&[Identifier, Assign, Identifier, Terminator]),
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidProduction);
        assert_eq!(diagnostics[0].message, "Production 'Value' is invalid");
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 3));
    }

    #[test]
    fn test_error_too_early_is_suppressed() {
        // only two tokens loaded before the first failure
        let diagnostics = parse_tokens(&list_grammar(), tokens(&[Identifier, Number]));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_trailing_tokens_reported_against_eof() {
        let diagnostics = parse_tokens(
            &list_grammar(),
            tokens(&[Identifier, Assign, Number, Terminator, Number]),
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::new(
                DiagnosticCode::Expected,
                "Expected Eof but got 'Number'",
                1,
                5
            )]
        );
    }

    #[test]
    fn test_forbid_raises_without_consuming() {
        let grammar = Grammar::new(
            "program",
            vec![production(
                "program",
                vec![
                    expect(Identifier),
                    expect(Identifier),
                    expect(Identifier),
                    forbid(&[Not], "no negation here"),
                    expect(Not),
                ],
            )],
        )
        .unwrap();
        let diagnostics = parse_tokens(&grammar, tokens(&[Identifier, Identifier, Identifier, Not]));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::new(DiagnosticCode::Forbidden, "no negation here", 1, 4)]
        );
    }

    #[test]
    fn test_repeat_without_progress_terminates() {
        let grammar = Grammar::new(
            "program",
            vec![production(
                "program",
                vec![repeat(&[Identifier], vec![expect(Number)])],
            )],
        )
        .unwrap();
        let diagnostics = parse_tokens(&grammar, tokens(&[Identifier]));
        // loop body fails once and stops; Eof check fails inside the window
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_lex_error_in_stream_is_returned() {
        let grammar = list_grammar();
        let stream = vec![
            Ok(Token::new(Identifier, "a", 1, 1)),
            Ok(Token::new(Assign, ":=", 1, 4)),
            Err(LexError::new(1, 5, 5)),
        ];
        let result = Parser::new(&grammar, stream.into_iter()).parse();
        assert_eq!(result, Err(LexError::new(1, 5, 5)));
    }

    #[test]
    fn test_lex_error_after_stalled_parse_is_returned() {
        // a list cannot start with `Number`, so the parse stops pulling after the first token
        let grammar = list_grammar();
        let stream = vec![
            Ok(Token::new(Number, "1", 1, 1)),
            Ok(Token::new(Number, "2", 1, 3)),
            Err(LexError::new(1, 4, 4)),
        ];
        let result = Parser::new(&grammar, stream.into_iter()).parse();
        assert_eq!(result, Err(LexError::new(1, 4, 4)));
    }

    #[test]
    fn test_cursor_stays_on_last_token_at_end() {
        let grammar = list_grammar();
        let mut parser = Parser::new(&grammar, tokens(&[]).into_iter().map(Ok));
        parser.run();
        assert!(parser.current().is_end());
        assert!(parser.diagnostics().is_empty());
    }
}
