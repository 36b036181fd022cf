//! Main module for labparse library functionality

pub mod config;
pub mod error;
pub mod formats;
pub mod grammars;
pub mod language;
pub mod lexing;
pub mod parsing;

pub use error::{GrammarError, LexError, PatternError};
pub use language::{Analysis, Language};
pub use parsing::Diagnostic;
