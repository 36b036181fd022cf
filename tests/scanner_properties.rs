//! Property-based tests for the scanners and the parser engine
//!
//! Inputs are drawn from the characters the languages use, plus a few they reject, so both the
//! accepting and the failing paths get exercised.

use labparse::labparse::grammars::imperative::{self, ImperativeToken};
use labparse::labparse::lexing::{LineCounting, Token};
use labparse::labparse::parsing::parse_tokens;
use labparse::labparse::Language;
use proptest::prelude::*;

fn source_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_ \n;:=(){}\\[\\]+*/<>!&|.%-]{0,60}"
}

fn language_strategy() -> impl Strategy<Value = Language> {
    prop::sample::select(Language::ALL.to_vec())
}

fn token_kind_strategy() -> impl Strategy<Value = ImperativeToken> {
    use ImperativeToken::*;
    prop::sample::select(vec![
        Const, Var, Do, While, Or, And, Not, Terminator, Identifier, Number, BlockBegin, BlockEnd,
        IndexerBegin, IndexerEnd, ParBegin, ParEnd, RelOp, Eq, Assign, Add, Sub, Mul, Div,
    ])
}

proptest! {
    #[test]
    fn test_tokenize_is_idempotent(language in language_strategy(), source in source_strategy()) {
        let first = language.tokenize(&source);
        let second = language.tokenize(&source);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_token_stream_ends_with_single_eof(language in language_strategy(), source in source_strategy()) {
        if let Ok(tokens) = language.tokenize(&source) {
            let eofs = tokens.iter().filter(|t| t.kind == "Eof").count();
            prop_assert_eq!(eofs, 1);
            prop_assert_eq!(tokens.last().map(|t| t.kind.as_str()), Some("Eof"));
        }
    }

    #[test]
    fn test_physical_positions_never_go_backwards(language in language_strategy(), source in source_strategy()) {
        if let Ok(tokens) = language.tokenize_with(&source, LineCounting::Physical) {
            for pair in tokens.windows(2) {
                prop_assert!((pair[0].line, pair[0].column) <= (pair[1].line, pair[1].column));
            }
        }
    }

    #[test]
    fn test_check_always_terminates(language in language_strategy(), source in source_strategy()) {
        // either outcome is fine; reaching this point is the property
        let _ = language.check(&source);
    }

    #[test]
    fn test_streaming_matches_collected(language in language_strategy(), source in source_strategy()) {
        let streamed = language.check(&source);
        let analysis = language.analyze(&source, LineCounting::NonBlank);
        match (streamed, analysis) {
            (Ok(diagnostics), Ok(analysis)) => prop_assert_eq!(diagnostics, analysis.diagnostics),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "outcomes differ: {:?} vs {:?}", a, b.map(|x| x.diagnostics)),
        }
    }

    #[test]
    fn test_parser_terminates_on_arbitrary_token_sequences(
        kinds in prop::collection::vec(token_kind_strategy(), 0..40)
    ) {
        let tokens: Vec<Token<ImperativeToken>> = kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| Token::new(kind, "", 1, i + 1))
            .chain(std::iter::once(Token::end_of_input(1, kinds.len() + 1)))
            .collect();
        let diagnostics = parse_tokens(imperative::grammar(), tokens);
        // every recorded diagnostic needs three fresh tokens since the previous raise
        prop_assert!(diagnostics.len() <= kinds.len() / 3 + 1);
    }
}
