//! Knowledge responders
//!
//! A responder turns an already classified query into an [`Answer`]. It
//! picks the best entry of its category with the similarity matcher and
//! frames the entry's payload by question type. When nothing in the
//! category matches confidently it answers with an in-category fallback;
//! it never declines.

mod admissions;
mod guidance;

use std::sync::Arc;

pub use admissions::AdmissionsResponder;
pub use guidance::GuidanceResponder;

use crate::format::{Answer, Section};
use crate::knowledge::{Category, KnowledgeBase, KnowledgeEntry};
use crate::matcher::{MatchResult, SimilarityMatcher};
use crate::query::{Query, TokenSet};
use crate::question::QuestionType;

/// Related topics offered in a fallback answer
const FALLBACK_SUGGESTIONS: usize = 3;

/// Answers in-scope queries for one knowledge category
pub trait Responder: std::fmt::Debug + Send + Sync {
    /// Category this responder serves
    fn category(&self) -> Category;

    /// Answer a query already classified into this responder's category
    fn respond(&self, query: &Query, question_type: QuestionType) -> Answer;
}

/// Fixed answer for out-of-scope queries
#[must_use]
pub fn decline() -> Answer {
    Answer {
        keys: Vec::new(),
        sections: vec![
            Section::text(
                "I'm sorry, that question is outside what I can help with.",
            ),
            Section::list(
                "I can answer questions about",
                vec![
                    "Admissions: requirements, deadlines and fees".to_string(),
                    "Academic guidance: study skills, time management and course selection"
                        .to_string(),
                    "Orientation: getting started on campus".to_string(),
                    "Career planning: internships, resumes and jobs".to_string(),
                ],
            ),
        ],
    }
}

/// Entry selection and fallback shared by both responders
#[derive(Debug, Clone)]
struct EntrySelector {
    category: Category,
    knowledge: Arc<KnowledgeBase>,
    matcher: Arc<SimilarityMatcher>,
}

impl EntrySelector {
    fn new(
        category: Category,
        knowledge: Arc<KnowledgeBase>,
        matcher: Arc<SimilarityMatcher>,
    ) -> Self {
        Self {
            category,
            knowledge,
            matcher,
        }
    }

    /// Best entry of the category at or above the match threshold
    ///
    /// Each entry competes with its pattern and every alias. Entries whose
    /// key the query names (`bachelor` in "fees for a bachelor degree")
    /// compete first; the whole category is tried only when none of them
    /// clears the threshold.
    fn select(&self, query: &Query) -> Option<&KnowledgeEntry> {
        let terms = query.terms(self.matcher.ignores_stopwords());
        let entries = self.knowledge.entries(self.category);

        let named = self.best_of(&terms, entries.iter().filter(|e| e.is_named_by(&terms)));
        let by_key = named.is_some();
        let hit = named.or_else(|| self.best_of(&terms, entries.iter()));

        match &hit {
            Some(m) => tracing::debug!(
                category = %self.category,
                key = m.item.key(),
                score = m.score.value,
                by_key,
                "selected knowledge entry"
            ),
            None => tracing::debug!(category = %self.category, "no confident entry match"),
        }
        hit.map(|m| m.item)
    }

    fn best_of<'a>(
        &self,
        terms: &TokenSet,
        entries: impl Iterator<Item = &'a KnowledgeEntry>,
    ) -> Option<MatchResult<&'a KnowledgeEntry>> {
        let ignore = self.matcher.ignores_stopwords();
        let candidates =
            entries.flat_map(|entry| entry.phrases().map(move |p| (entry, p.terms(ignore))));
        self.matcher.best_match(terms, candidates)
    }

    /// In-category answer when no entry matched
    fn fallback(&self, query: &Query, prompt: &str) -> Answer {
        let terms = query.terms(self.matcher.ignores_stopwords());
        let related: Vec<String> = self
            .knowledge
            .search_category(self.category, &terms, FALLBACK_SUGGESTIONS)
            .into_iter()
            .map(|hit| hit.title.to_string())
            .collect();

        let suggestions = if related.is_empty() {
            Section::list(
                "Topics I can help with",
                self.knowledge
                    .entries(self.category)
                    .iter()
                    .map(|e| e.title().to_string())
                    .collect(),
            )
        } else {
            Section::list("You might be asking about", related)
        };

        Answer {
            keys: Vec::new(),
            sections: vec![Section::text(prompt), suggestions],
        }
    }
}
