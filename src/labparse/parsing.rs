//! Parser
//!
//! One predictive-descent engine shared by every language.
//!
//! Structure:
//!     A language describes its syntax as data: a [`Grammar`] of named productions whose bodies
//!     are [`Rule`]s (expect a terminal, call a production, repeat / optionally run / choose a body
//!     by one token of lookahead, reject a lookahead). The [`Parser`] walks those rules with the
//!     native call stack, so the active production chain is exactly the call stack of
//!     `call(...)`. There is no backtracking and no explicit automaton.
//!
//! Error recovery
//!
//!     A mismatch never aborts the parse. The engine records a [`Diagnostic`] and carries on as if
//!     the construct had succeeded: an unmet `Expect` does not advance, a `Choice` without a
//!     matching arm does not advance, and the enclosing rules run into the next mismatch
//!     naturally. To keep that from flooding the report, a diagnostic is only recorded when more
//!     than [`SUPPRESSION_WINDOW`] tokens were consumed since the previous one was raised; raising
//!     always resets the count, recorded or not.

pub mod diagnostics;
pub mod engine;
pub mod grammar;

pub use diagnostics::{Diagnostic, DiagnosticCode};
pub use engine::{parse_tokens, Parser, SUPPRESSION_WINDOW};
pub use grammar::{Arm, Grammar, Production, Rule};
