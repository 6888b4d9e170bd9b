//! The built-in grammar.
//!
//! Whitespace, newlines and `//` comments are skipped; `if`, `else` and
//! `query` are keywords; any other run of letters, digits and underscores is
//! an identifier.

use once_cell::sync::Lazy;

use crate::error::PatternError;
use crate::scanner::{Matcher, MatchPolicy, PatternTable};

/// Keywords of the built-in grammar, in declaration order
pub const KEYWORDS: &[&str] = &["if", "else", "query"];

/// Identifier pattern of the built-in grammar
pub const IDENTIFIER_PATTERN: &str = r"[A-Za-z0-9_]+";

static DEFAULT_TABLE: Lazy<PatternTable> = Lazy::new(|| {
    build(MatchPolicy::LongestMatch).expect("built-in grammar patterns are valid")
});

static FIRST_MATCH_TABLE: Lazy<PatternTable> = Lazy::new(|| {
    build(MatchPolicy::FirstMatch).expect("built-in grammar patterns are valid")
});

/// The process-wide built-in table, longest-match policy.
pub fn default_table() -> &'static PatternTable {
    &DEFAULT_TABLE
}

/// The built-in table with first-match policy.
pub fn first_match_table() -> &'static PatternTable {
    &FIRST_MATCH_TABLE
}

/// Builds a fresh copy of the built-in grammar.
pub fn build(policy: MatchPolicy) -> Result<PatternTable, PatternError> {
    let mut matchers = vec![
        Matcher::skip("whitespace", r"[ \t\r\f]+"),
        Matcher::newline(),
        Matcher::line_comment("//"),
    ];
    matchers.extend(KEYWORDS.iter().map(|kw| Matcher::keyword(kw)));
    matchers.push(Matcher::identifier(IDENTIFIER_PATTERN));

    PatternTable::from_results(matchers, policy)
}
