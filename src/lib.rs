//! # labparse
//!
//! Scanners and error-tolerant predictive parsers for two small lab languages:
//! an imperative language (declarations, assignments, do-while loops, arrays)
//! and a boolean expression language.
//!
//! Both languages run through the same machinery: an ordered regex pattern
//! table feeds a streaming [`Scanner`](labparse::lexing::Scanner), and a data
//! grammar drives the shared predictive-descent engine, which collects
//! diagnostics instead of stopping at the first defect.
//!
//! ```text
//! source --Scanner--> tokens --Parser(grammar)--> Vec<Diagnostic>
//! ```
//!
//! Most callers only need [`Language`](labparse::language::Language):
//!
//! ```rust,ignore
//! use labparse::labparse::language::Language;
//!
//! let diagnostics = Language::Imperative.check("var x := 1; x := x + 1;")?;
//! assert!(diagnostics.is_empty());
//! ```

pub mod labparse;
