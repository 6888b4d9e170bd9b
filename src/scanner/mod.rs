//! Lexical scanning module.
//!
//! Source text is turned into a stream of tokens by a priority-ordered table
//! of anchored regular expressions. At each cursor position the table picks
//! the best matcher; silent matchers only move the position (whitespace,
//! comments), producing matchers emit a token.

mod engine;
mod matcher;
mod position;
mod source;
mod table;
mod token;

pub use engine::Scanner;
pub use matcher::{Action, Matcher};
pub use position::{ColumnDelta, Position, PositionDelta};
pub use source::Source;
pub use table::{Match, MatchPolicy, PatternTable};
pub use token::{Token, TokenKind, TokenStream};
