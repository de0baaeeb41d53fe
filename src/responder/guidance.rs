//! Academic guidance responder

use std::sync::Arc;

use super::{EntrySelector, Responder};
use crate::format::{Answer, Section};
use crate::knowledge::{Category, KnowledgeBase, KnowledgeEntry, Payload};
use crate::matcher::SimilarityMatcher;
use crate::query::Query;
use crate::question::QuestionType;

const FALLBACK_PROMPT: &str = "I can help with academic guidance, but I couldn't find a close match. \
     Try asking about study skills, time management, course selection, or career planning.";

/// Answers study, orientation and career questions
#[derive(Debug, Clone)]
pub struct GuidanceResponder {
    selector: EntrySelector,
}

impl GuidanceResponder {
    /// Create a responder over shared knowledge
    #[must_use]
    pub fn new(knowledge: Arc<KnowledgeBase>, matcher: Arc<SimilarityMatcher>) -> Self {
        Self {
            selector: EntrySelector::new(Category::Guidance, knowledge, matcher),
        }
    }
}

impl Responder for GuidanceResponder {
    fn category(&self) -> Category {
        Category::Guidance
    }

    fn respond(&self, query: &Query, question_type: QuestionType) -> Answer {
        match self.selector.select(query) {
            Some(entry) => render(entry, question_type),
            None => self.selector.fallback(query, FALLBACK_PROMPT),
        }
    }
}

/// HOW questions get the strategies first
fn render(entry: &KnowledgeEntry, question_type: QuestionType) -> Answer {
    let Payload::Guidance(facts) = entry.payload() else {
        return Answer {
            keys: vec![entry.key().to_string()],
            sections: vec![Section::text(entry.title())],
        };
    };

    let summary = Section::text(facts.summary.clone());
    let strategies = Section::list("Strategies", facts.strategies.clone());
    let resources = Section::list("Resources", facts.resources.clone());

    let sections = match question_type {
        QuestionType::How => vec![strategies, resources],
        QuestionType::What | QuestionType::Other => vec![summary, strategies, resources],
        QuestionType::Why | QuestionType::When => vec![summary, strategies],
    };

    Answer {
        keys: vec![entry.key().to_string()],
        sections,
    }
}
