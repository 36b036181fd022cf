//! Line and column tracking
//!
//!     Positions are computed incrementally while the scanner advances, one pass over the
//!     consumed text, instead of rescanning the prefix for every token.
//!
//!     Two counting rules exist:
//!
//!     NonBlank (default):
//!         Only `\n` separates lines; `\r` is an ordinary character. The line number is the
//!         count of NON-EMPTY lines in the prefix, so blank lines do not advance it. The column
//!         is the length of the text after the last line break; when that is empty (the offset
//!         sits right after a `\n`) it is the length of the last non-empty line. With no
//!         non-empty line at all the position is 1:1. Report fixtures rely on these
//!         numbers.
//!
//!     Physical:
//!         Line is one plus the number of `\n` before the offset, column is the length of the
//!         text after the last line break (at least 1).

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which rule maps offsets to line numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LineCounting {
    #[default]
    NonBlank,
    Physical,
}

impl LineCounting {
    /// Configuration spelling of the rule.
    pub fn name(self) -> &'static str {
        match self {
            LineCounting::NonBlank => "non-blank",
            LineCounting::Physical => "physical",
        }
    }
}

/// A 1-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Running position state over the text consumed so far.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    counting: LineCounting,
    line_breaks: usize,
    completed_non_blank: usize,
    last_non_blank_len: usize,
    current_len: usize,
}

impl LineIndex {
    pub fn new(counting: LineCounting) -> Self {
        Self {
            counting,
            ..Self::default()
        }
    }

    /// Account for `text`, which immediately follows everything seen before.
    pub fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                if self.current_len > 0 {
                    self.completed_non_blank += 1;
                    self.last_non_blank_len = self.current_len;
                }
                self.line_breaks += 1;
                self.current_len = 0;
            } else {
                self.current_len += 1;
            }
        }
    }

    /// Position of the offset reached so far.
    pub fn position(&self) -> Position {
        match self.counting {
            LineCounting::NonBlank => {
                if self.current_len > 0 {
                    Position::new(self.completed_non_blank + 1, self.current_len)
                } else if self.completed_non_blank > 0 {
                    Position::new(self.completed_non_blank, self.last_non_blank_len)
                } else {
                    Position::new(1, 1)
                }
            }
            LineCounting::Physical => Position::new(self.line_breaks + 1, self.current_len.max(1)),
        }
    }
}
