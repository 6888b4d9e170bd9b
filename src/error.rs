//! Error types shared by the pattern table, the scanner and the driver.
//!
//! Scanning is all-or-nothing: every failure is reported through one of the
//! enums below and no partial token stream is returned alongside it.

use crate::scanner::Position;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// Number of characters of unconsumed input quoted in a `NoMatch` error.
pub const EXCERPT_LEN: usize = 16;

/// Top-level error type
#[derive(Error, Debug)]
pub enum LexError {
    /// The input source could not be read to exhaustion
    #[error("failed to read input: {0}")]
    InputRead(#[from] std::io::Error),

    /// The scan itself failed
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The pattern table could not be built
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Failures raised while scanning a buffer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// No matcher accepts the text at the cursor
    #[error("no pattern matches at {position}: '{excerpt}'")]
    NoMatch {
        position: Position,
        excerpt: String,
        /// Byte length of the first unmatched character
        len: usize,
    },

    /// A producing matcher was selected but its action returned nothing
    #[error("matcher '{matcher}' produced no token for '{text}' at {position}")]
    NoTokenProduced {
        matcher: String,
        position: Position,
        text: String,
    },
}

impl ScanError {
    pub fn position(&self) -> Position {
        match self {
            ScanError::NoMatch { position, .. } => *position,
            ScanError::NoTokenProduced { position, .. } => *position,
        }
    }

    /// Builds a `NoMatch` quoting the start of `remaining`, up to the first
    /// newline. The offending character itself is always quoted, escaped
    /// when it is a control character.
    pub(crate) fn no_match(position: Position, remaining: &str) -> Self {
        let first = remaining.chars().next();
        let excerpt = match first {
            Some(c) if c.is_control() => c.escape_debug().collect(),
            _ => remaining
                .chars()
                .take_while(|&c| c != '\n')
                .take(EXCERPT_LEN)
                .collect(),
        };
        ScanError::NoMatch {
            position,
            excerpt,
            len: first.map_or(0, char::len_utf8),
        }
    }
}

/// Failures raised while building a pattern table
#[derive(Error, Debug, Clone)]
pub enum PatternError {
    #[error("invalid pattern for matcher '{matcher}': {pattern}")]
    InvalidPattern {
        matcher: String,
        pattern: String,
        source: regex::Error,
    },

    #[error("pattern table has no matchers")]
    EmptyTable,
}

/// Result alias
pub type LexResult<T> = Result<T, LexError>;

/// An error paired with the file it belongs to, ready for rendering
#[derive(Debug)]
pub struct DiagnosticError<'e> {
    pub error: &'e LexError,
    pub file_id: usize,
}

impl<'e> DiagnosticError<'e> {
    pub fn new(error: &'e LexError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// Converts into a codespan-reporting `Diagnostic`
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let labels = match self.error {
            LexError::Scan(ScanError::NoMatch { position, len, .. }) => {
                vec![Label::primary(self.file_id, position.offset..position.offset + len)
                    .with_message("no pattern matches here")]
            }
            LexError::Scan(ScanError::NoTokenProduced {
                matcher,
                position,
                text,
            }) => vec![
                Label::primary(self.file_id, position.offset..position.offset + text.len())
                    .with_message(format!("matched by '{}'", matcher)),
            ],
            LexError::InputRead(_) | LexError::Pattern(_) => vec![],
        };

        let mut diagnostic = Diagnostic::error()
            .with_message(self.error.to_string())
            .with_labels(labels);

        if let LexError::Scan(ScanError::NoTokenProduced { .. }) = self.error {
            diagnostic = diagnostic
                .with_notes(vec!["the matcher's action is broken, not the input".to_string()]);
        }

        diagnostic
    }
}
