//! The priority-ordered pattern table.

use super::matcher::Matcher;
use crate::error::PatternError;

/// How the table chooses between several matchers that all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Longest match wins, ties go to the earliest declaration.
    #[default]
    LongestMatch,
    /// The first matcher in declaration order wins, whatever its length.
    FirstMatch,
}

/// The winner of one table lookup.
#[derive(Debug, Clone, Copy)]
pub struct Match<'t> {
    pub matcher: &'t Matcher,
    /// Index of the matcher in declaration order
    pub index: usize,
    /// Matched length in bytes, always > 0
    pub len: usize,
}

/// An immutable, ordered list of matchers.
#[derive(Debug)]
pub struct PatternTable {
    matchers: Vec<Matcher>,
    policy: MatchPolicy,
}

impl PatternTable {
    pub fn new(matchers: Vec<Matcher>) -> Result<Self, PatternError> {
        Self::with_policy(matchers, MatchPolicy::default())
    }

    pub fn with_policy(matchers: Vec<Matcher>, policy: MatchPolicy) -> Result<Self, PatternError> {
        if matchers.is_empty() {
            return Err(PatternError::EmptyTable);
        }
        Ok(Self { matchers, policy })
    }

    /// Collects fallible matcher constructors into a table.
    pub fn from_results<I>(matchers: I, policy: MatchPolicy) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = Result<Matcher, PatternError>>,
    {
        let matchers = matchers.into_iter().collect::<Result<Vec<_>, _>>()?;
        Self::with_policy(matchers, policy)
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Finds the best matcher for the start of `remaining`.
    pub fn evaluate(&self, remaining: &str) -> Option<Match<'_>> {
        let mut candidates = self
            .matchers
            .iter()
            .enumerate()
            .filter_map(|(index, matcher)| {
                matcher.match_len(remaining).map(|len| Match {
                    matcher,
                    index,
                    len,
                })
            });

        match self.policy {
            MatchPolicy::FirstMatch => candidates.next(),
            // on equal length the earlier declaration stays
            MatchPolicy::LongestMatch => candidates.fold(None, |best: Option<Match<'_>>, m| {
                match best {
                    Some(b) if b.len >= m.len => Some(b),
                    _ => Some(m),
                }
            }),
        }
    }
}
