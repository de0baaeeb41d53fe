//! Similarity matching between a query and candidate patterns
//!
//! Scoring is pluggable through the [`Scorer`] trait; the default
//! [`JaccardScorer`] is plain lexical overlap. Matching is pure: identical
//! inputs always produce the identical [`MatchResult`].

use std::cmp::Ordering;

use serde::Serialize;

use crate::query::TokenSet;
use crate::{Error, Result};

/// Default minimum score for a confident match
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.15;

/// Score of one query/pattern comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    /// Normalized similarity in `[0, 1]`
    pub value: f64,
    /// Number of shared terms, the first tie-breaker
    pub overlap: usize,
}

impl Score {
    /// A zero score
    pub const ZERO: Self = Self {
        value: 0.0,
        overlap: 0,
    };

    /// Ordering used to pick a winner: value, then overlap
    #[must_use]
    pub fn rank(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then(self.overlap.cmp(&other.overlap))
    }
}

/// Scoring strategy for comparing a query against a pattern
///
/// Implementations must be deterministic and side-effect free
pub trait Scorer: std::fmt::Debug + Send + Sync {
    /// Score `query` against `pattern`
    fn score(&self, query: &TokenSet, pattern: &TokenSet) -> Score;
}

/// Jaccard overlap: `|query ∩ pattern| / |query ∪ pattern|`
///
/// Two empty sets score zero
#[derive(Debug, Clone, Copy, Default)]
pub struct JaccardScorer;

impl Scorer for JaccardScorer {
    #[allow(clippy::cast_precision_loss)]
    fn score(&self, query: &TokenSet, pattern: &TokenSet) -> Score {
        let overlap = query.overlap(pattern);
        let union = query.union_len(pattern);
        if union == 0 {
            return Score::ZERO;
        }

        Score {
            value: overlap as f64 / union as f64,
            overlap,
        }
    }
}

/// Outcome of matching a query against a candidate set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<T> {
    /// Winning candidate
    pub item: T,
    /// Insertion position of the winner, the last tie-breaker
    pub index: usize,
    /// Winning score
    pub score: Score,
}

/// Scores queries against candidate patterns
#[derive(Debug)]
pub struct SimilarityMatcher {
    scorer: Box<dyn Scorer>,
    threshold: f64,
    ignore_stopwords: bool,
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self {
            scorer: Box::new(JaccardScorer),
            threshold: DEFAULT_MATCH_THRESHOLD,
            ignore_stopwords: true,
        }
    }
}

impl SimilarityMatcher {
    /// Create a Jaccard matcher with the given threshold
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the threshold is not in `(0, 1]`
    pub fn new(threshold: f64) -> Result<Self> {
        Self::with_scorer(Box::new(JaccardScorer), threshold)
    }

    /// Create a matcher with a custom scoring strategy
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the threshold is not in `(0, 1]`
    pub fn with_scorer(scorer: Box<dyn Scorer>, threshold: f64) -> Result<Self> {
        validate_threshold("match", threshold)?;
        Ok(Self {
            scorer,
            threshold,
            ignore_stopwords: true,
        })
    }

    /// Keep or drop stopwords when building term sets
    #[must_use]
    pub fn ignore_stopwords(mut self, ignore: bool) -> Self {
        self.ignore_stopwords = ignore;
        self
    }

    /// Whether stopwords are dropped before scoring
    #[must_use]
    pub const fn ignores_stopwords(&self) -> bool {
        self.ignore_stopwords
    }

    /// Best-scoring candidate regardless of threshold
    ///
    /// Ties go to the larger overlap, then to the earlier candidate.
    /// Returns `None` only when there are no candidates.
    pub fn best<'c, T, I>(&self, query: &TokenSet, candidates: I) -> Option<MatchResult<T>>
    where
        I: IntoIterator<Item = (T, &'c TokenSet)>,
    {
        let mut best: Option<MatchResult<T>> = None;

        for (index, (item, pattern)) in candidates.into_iter().enumerate() {
            let score = self.scorer.score(query, pattern);
            let better = best
                .as_ref()
                .is_none_or(|b| score.rank(&b.score) == Ordering::Greater);
            if better {
                best = Some(MatchResult { item, index, score });
            }
        }

        best
    }

    /// Best candidate scoring at least the configured threshold
    ///
    /// The boundary is inclusive: a score equal to the threshold matches
    pub fn best_match<'c, T, I>(&self, query: &TokenSet, candidates: I) -> Option<MatchResult<T>>
    where
        I: IntoIterator<Item = (T, &'c TokenSet)>,
    {
        self.best_above(query, candidates, self.threshold)
    }

    /// Best candidate scoring at least `threshold`
    pub fn best_above<'c, T, I>(
        &self,
        query: &TokenSet,
        candidates: I,
        threshold: f64,
    ) -> Option<MatchResult<T>>
    where
        I: IntoIterator<Item = (T, &'c TokenSet)>,
    {
        self.best(query, candidates)
            .filter(|m| m.score.value >= threshold)
    }
}

/// Check that a threshold is finite and in `(0, 1]`
///
/// # Errors
///
/// Returns `Error::Config` naming the offending threshold
pub fn validate_threshold(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{name} threshold must be in (0, 1], got {value}"
        )))
    }
}
