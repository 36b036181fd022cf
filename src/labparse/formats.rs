//! Report rendering
//!
//! An [`Analysis`] can be printed three ways:
//! - `text`: the scanner output (`Kind(lexeme)` joined by spaces) followed by the parser output
//!   (`Found N errors.` and one `- <diagnostic>` line each)
//! - `json` / `yaml`: the same data as a structured report

use crate::labparse::language::{Analysis, Language};
use crate::labparse::lexing::TokenRecord;
use crate::labparse::parsing::Diagnostic;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to serialize report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize report as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    language: Language,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<&'a [TokenRecord]>,
    diagnostics: &'a [Diagnostic],
}

impl<'a> Report<'a> {
    fn new(analysis: &'a Analysis, show_tokens: bool) -> Self {
        Self {
            language: analysis.language,
            accepted: analysis.is_accepted(),
            tokens: show_tokens.then_some(analysis.tokens.as_slice()),
            diagnostics: &analysis.diagnostics,
        }
    }
}

/// Render `analysis` in the requested format. `show_tokens` controls the scanner section.
pub fn render(
    analysis: &Analysis,
    format: OutputFormat,
    show_tokens: bool,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Text => Ok(render_text(analysis, show_tokens)),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&Report::new(analysis, show_tokens))?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&Report::new(analysis, show_tokens))?),
    }
}

fn render_text(analysis: &Analysis, show_tokens: bool) -> String {
    let mut out = String::new();
    if show_tokens {
        out.push_str("Scanner output:\n");
        out.push_str(&render_tokens(&analysis.tokens));
        out.push_str("\n\n");
    }
    out.push_str("Parser output:\n");
    let _ = writeln!(out, "Found {} errors.", analysis.diagnostics.len());
    for diagnostic in &analysis.diagnostics {
        let _ = writeln!(out, "- {}", diagnostic);
    }
    out
}

/// Tokens as `Kind(lexeme)`, separated by single spaces.
pub fn render_tokens(tokens: &[TokenRecord]) -> String {
    tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
