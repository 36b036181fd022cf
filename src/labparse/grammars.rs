//! Language definitions
//!
//! Each language is three tables and nothing else:
//! - a token-kind enumeration implementing [`TokenKind`](crate::labparse::lexing::TokenKind)
//! - an ordered pattern table for the scanner
//! - a grammar table for the parser engine
//!
//! Tables are built once, on first use.

pub mod boolean;
pub mod imperative;
