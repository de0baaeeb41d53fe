//! Intent classification
//!
//! Lexical-overlap classification into admissions, guidance or out of scope.
//! Fully deterministic for fixed lexicons and thresholds.
//!
//! Decision policy:
//! 1. Empty query => out of scope, no matching attempted
//! 2. Out-of-scope score >= best in-scope score and >= out-of-scope
//!    threshold => out of scope
//! 3. Otherwise the higher of admissions/guidance wins (admissions on ties);
//!    below the in-scope threshold => out of scope

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::knowledge::{Category, KnowledgeBase, Lexicon, Phrase};
use crate::matcher::{Score, SimilarityMatcher, validate_threshold};
use crate::query::{Query, TokenSet};
use crate::Result;

/// Default minimum out-of-scope score to decline
pub const DEFAULT_OUT_OF_SCOPE_THRESHOLD: f64 = 0.25;

/// Default minimum in-scope score to accept
pub const DEFAULT_IN_SCOPE_THRESHOLD: f64 = 0.15;

/// Classified category of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Admissions,
    Guidance,
    OutOfScope,
}

impl Intent {
    /// Stable uppercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admissions => "ADMISSIONS",
            Self::Guidance => "GUIDANCE",
            Self::OutOfScope => "OUT_OF_SCOPE",
        }
    }

    /// Knowledge category for in-scope intents
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        match self {
            Self::Admissions => Some(Category::Admissions),
            Self::Guidance => Some(Category::Guidance),
            Self::OutOfScope => None,
        }
    }
}

impl From<Category> for Intent {
    fn from(category: Category) -> Self {
        match category {
            Category::Admissions => Self::Admissions,
            Category::Guidance => Self::Guidance,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse band of a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// `< 0.3` low, `< 0.7` medium, otherwise high
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < 0.3 {
            Self::Low
        } else if score < 0.7 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Why a classification came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// Query had no words
    EmptyQuery,
    /// Out-of-scope lexicon matched at least as well as any in-scope lexicon
    OutOfScopeLexicon,
    /// Nothing scored above the in-scope threshold
    NoConfidentMatch,
    /// An in-scope lexicon matched
    InScopeLexicon,
}

/// Classifier thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum out-of-scope score to decline
    pub out_of_scope: f64,
    /// Minimum in-scope score to accept
    pub in_scope: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            out_of_scope: DEFAULT_OUT_OF_SCOPE_THRESHOLD,
            in_scope: DEFAULT_IN_SCOPE_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Check both thresholds are in `(0, 1]`
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the offending threshold
    pub fn validate(&self) -> Result<()> {
        validate_threshold("out-of-scope", self.out_of_scope)?;
        validate_threshold("in-scope", self.in_scope)
    }
}

/// Result of classifying one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Assigned intent
    pub intent: Intent,
    /// Score that decided the intent; zero when nothing matched
    pub confidence: f64,
    /// Band of `confidence`
    pub level: ConfidenceLevel,
    /// Decision path taken
    pub basis: Basis,
    /// Lexicon phrase behind the decision
    pub matched_phrase: Option<String>,
    /// Best admissions lexicon score
    pub admissions_score: f64,
    /// Best guidance lexicon score
    pub guidance_score: f64,
    /// Best out-of-scope lexicon score
    pub out_of_scope_score: f64,
}

impl Classification {
    fn empty() -> Self {
        Self {
            intent: Intent::OutOfScope,
            confidence: 0.0,
            level: ConfidenceLevel::Low,
            basis: Basis::EmptyQuery,
            matched_phrase: None,
            admissions_score: 0.0,
            guidance_score: 0.0,
            out_of_scope_score: 0.0,
        }
    }
}

/// Best phrase of one lexicon
struct LexiconHit<'a> {
    phrase: Option<&'a Phrase>,
    score: Score,
}

/// Assigns an intent to each query
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    knowledge: Arc<KnowledgeBase>,
    matcher: Arc<SimilarityMatcher>,
    thresholds: Thresholds,
}

impl IntentClassifier {
    /// Create a classifier over shared, read-only knowledge
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if either threshold is out of range
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        matcher: Arc<SimilarityMatcher>,
        thresholds: Thresholds,
    ) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self {
            knowledge,
            matcher,
            thresholds,
        })
    }

    /// Classify a query
    #[must_use]
    pub fn classify(&self, query: &Query) -> Classification {
        if query.is_empty() {
            tracing::debug!("empty query, declining");
            return Classification::empty();
        }

        let terms = query.terms(self.matcher.ignores_stopwords());
        let out_of_scope = self.best_phrase(&terms, self.knowledge.out_of_scope());
        let admissions =
            self.best_phrase(&terms, self.knowledge.lexicon(Category::Admissions));
        let guidance = self.best_phrase(&terms, self.knowledge.lexicon(Category::Guidance));

        let mut classification = Classification {
            intent: Intent::OutOfScope,
            confidence: 0.0,
            level: ConfidenceLevel::Low,
            basis: Basis::NoConfidentMatch,
            matched_phrase: None,
            admissions_score: admissions.score.value,
            guidance_score: guidance.score.value,
            out_of_scope_score: out_of_scope.score.value,
        };

        let in_scope_best = admissions.score.value.max(guidance.score.value);
        let (category, winner) = if guidance.score.value > admissions.score.value {
            (Category::Guidance, guidance)
        } else {
            (Category::Admissions, admissions)
        };

        if out_of_scope.score.value >= in_scope_best
            && out_of_scope.score.value >= self.thresholds.out_of_scope
        {
            classification.basis = Basis::OutOfScopeLexicon;
            classification.confidence = out_of_scope.score.value;
            classification.matched_phrase = out_of_scope.phrase.map(|p| p.text().to_string());
        } else if winner.score.value >= self.thresholds.in_scope {
            classification.intent = category.into();
            classification.basis = Basis::InScopeLexicon;
            classification.confidence = winner.score.value;
            classification.matched_phrase = winner.phrase.map(|p| p.text().to_string());
        }
        classification.level = ConfidenceLevel::from_score(classification.confidence);

        tracing::debug!(
            intent = %classification.intent,
            basis = ?classification.basis,
            confidence = classification.confidence,
            admissions = classification.admissions_score,
            guidance = classification.guidance_score,
            out_of_scope = classification.out_of_scope_score,
            "classified query"
        );

        classification
    }

    fn best_phrase<'a>(&self, terms: &TokenSet, lexicon: &'a Lexicon) -> LexiconHit<'a> {
        let ignore = self.matcher.ignores_stopwords();
        let hit = self
            .matcher
            .best(terms, lexicon.phrases().iter().map(|p| (p, p.terms(ignore))));
        if let Some(m) = &hit {
            tracing::trace!(
                lexicon = lexicon.name(),
                phrase = m.item.text(),
                score = m.score.value,
                "best lexicon phrase"
            );
        }
        hit.map_or(
            LexiconHit {
                phrase: None,
                score: Score::ZERO,
            },
            |m| LexiconHit {
                phrase: Some(m.item),
                score: m.score,
            },
        )
    }
}
