use std::io;
use std::path::PathBuf;

use combine::easy;
use thiserror::Error;

/// The combine errors of a failed parse, with positions translated to byte
/// offsets into the parsed text.
pub type SyntaxErrors = easy::Errors<char, String, usize>;

/// The input does not describe what the puzzle expects.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: {errors}")]
    Syntax { line: usize, errors: SyntaxErrors },

    #[error("line {line}: {reason}")]
    Invalid { line: usize, reason: String },

    #[error("input is empty")]
    Empty,
}

impl ParseError {
    pub fn invalid(line: usize, reason: impl Into<String>) -> Self {
        Self::Invalid {
            line,
            reason: reason.into(),
        }
    }

    /// The 1-based line the error was found on, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } | Self::Invalid { line, .. } => Some(*line),
            Self::Empty => None,
        }
    }

    /// Shifts the line number by `lines`, for errors found in a slice that
    /// starts `lines` lines into the whole input.
    pub fn offset_lines(mut self, lines: usize) -> Self {
        if let Self::Syntax { line, .. } | Self::Invalid { line, .. } = &mut self {
            *line += lines;
        }
        self
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed input: {0}")]
    Parse(#[from] ParseError),

    #[error("no solution: {0}")]
    Unsolved(String),
}
