//! Matcher definitions: an anchored pattern paired with a silent or producing
//! action.

use regex::Regex;
use std::fmt;

use super::position::PositionDelta;
use super::token::{Token, TokenKind};
use crate::error::PatternError;

type SilentFn = dyn Fn(&str) -> PositionDelta + Send + Sync;
type ProducingFn = dyn for<'a> Fn(Token<'a>) -> Option<Token<'a>> + Send + Sync;

/// What happens to the text a matcher consumes.
pub enum Action {
    /// Consume the text and only move the position.
    Silent(Box<SilentFn>),
    /// Turn the text into a token. Returning `None` is a broken rule.
    Producing(Box<ProducingFn>),
}

impl Action {
    pub fn silent<F>(f: F) -> Self
    where
        F: Fn(&str) -> PositionDelta + Send + Sync + 'static,
    {
        Action::Silent(Box::new(f))
    }

    pub fn producing<F>(f: F) -> Self
    where
        F: for<'a> Fn(Token<'a>) -> Option<Token<'a>> + Send + Sync + 'static,
    {
        Action::Producing(Box::new(f))
    }

    /// Producing action that stamps a fixed kind on the token.
    pub fn emit(kind: TokenKind) -> Self {
        Self::producing(move |token| Some(token.with_kind(kind)))
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Action::Silent(_))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Silent(_) => f.write_str("Silent"),
            Action::Producing(_) => f.write_str("Producing"),
        }
    }
}

/// One row of a pattern table.
#[derive(Debug)]
pub struct Matcher {
    name: String,
    source: String,
    regex: Regex,
    action: Action,
}

impl Matcher {
    /// Compiles `pattern` anchored to the start of the remaining input.
    pub fn new(name: impl Into<String>, pattern: &str, action: Action) -> Result<Self, PatternError> {
        let name = name.into();
        let regex = Regex::new(&format!(r"\A(?:{})", pattern)).map_err(|source| {
            PatternError::InvalidPattern {
                matcher: name.clone(),
                pattern: pattern.to_owned(),
                source,
            }
        })?;

        Ok(Self {
            name,
            source: pattern.to_owned(),
            regex,
            action,
        })
    }

    /// Fixed word producing a `Keyword` token.
    pub fn keyword(word: &str) -> Result<Self, PatternError> {
        Self::new(word, &regex::escape(word), Action::emit(TokenKind::Keyword))
    }

    /// `pattern` producing `Identifier` tokens.
    pub fn identifier(pattern: &str) -> Result<Self, PatternError> {
        Self::new("identifier", pattern, Action::emit(TokenKind::Identifier))
    }

    /// Silently skips text matching `pattern`. Newlines inside the match are
    /// still counted.
    pub fn skip(name: impl Into<String>, pattern: &str) -> Result<Self, PatternError> {
        Self::new(name, pattern, Action::silent(PositionDelta::over))
    }

    /// Skips one `\n` or `\r\n`.
    pub fn newline() -> Result<Self, PatternError> {
        Self::new("newline", r"\r?\n", Action::silent(|_| PositionDelta::newline()))
    }

    /// Skips a comment starting with `prefix`, through the end of its line.
    pub fn line_comment(prefix: &str) -> Result<Self, PatternError> {
        let pattern = format!(r"{}[^\n]*\n?", regex::escape(prefix));
        Self::new("line_comment", &pattern, Action::silent(PositionDelta::over))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        &self.source
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Length in bytes of the match at the very start of `input`, if any.
    /// Empty matches are not matches: they would never move the cursor.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.regex
            .find(input)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}
