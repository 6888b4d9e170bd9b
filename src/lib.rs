//! patlex library
//!
//! A table-driven lexical scanner: source text in, positioned tokens out.

pub mod error;
pub mod grammar;
pub mod scanner;

// Re-export commonly used types
pub use error::{DiagnosticError, LexError, LexResult, PatternError, ScanError};
pub use scanner::{
    Action, MatchPolicy, Matcher, PatternTable, Position, Scanner, Source, Token, TokenKind,
    TokenStream,
};
