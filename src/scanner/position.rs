//! Source positions and the deltas matcher actions return.

use serde::Serialize;
use std::fmt;

/// Position tracking for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Byte offset into the scanned buffer
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
}

impl Position {
    pub fn new() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the position reached after consuming `len` bytes whose
    /// line/column effect is described by `delta`.
    pub fn advance(self, len: usize, delta: PositionDelta) -> Self {
        let (line, column) = match delta.column {
            ColumnDelta::Advance(n) => (self.line + delta.lines, self.column + n),
            ColumnDelta::Reset(n) => (self.line + delta.lines, 1 + n),
        };

        Position {
            offset: self.offset + len,
            line,
            column,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// How the column moves after a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDelta {
    /// Stay on the same line and move right by `n` columns.
    Advance(usize),
    /// A newline was consumed: restart at column 1, then move right by `n`.
    Reset(usize),
}

/// Line/column adjustment produced by consuming a piece of text.
///
/// The byte offset is not part of the delta: the engine always advances it by
/// the exact matched length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionDelta {
    pub lines: usize,
    pub column: ColumnDelta,
}

impl PositionDelta {
    /// Plain text: move the column by `columns`.
    pub fn columns(columns: usize) -> Self {
        PositionDelta {
            lines: 0,
            column: ColumnDelta::Advance(columns),
        }
    }

    /// A single newline: next line, column 1.
    pub fn newline() -> Self {
        PositionDelta {
            lines: 1,
            column: ColumnDelta::Reset(0),
        }
    }

    /// Delta for consuming `text`, counting every `\n` it contains.
    pub fn over(text: &str) -> Self {
        match text.rfind('\n') {
            None => Self::columns(text.chars().count()),
            Some(last) => PositionDelta {
                lines: text.matches('\n').count(),
                column: ColumnDelta::Reset(text[last + 1..].chars().count()),
            },
        }
    }

    pub fn is_newline(&self) -> bool {
        self.lines > 0
    }
}
