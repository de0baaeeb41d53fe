//! Intent routing and the end-to-end answering pipeline
//!
//! [`Router`] is a fixed dispatch table from [`Intent`] to a responder.
//! [`Desk`] wires classifier, router and formatter together over one shared
//! knowledge base. Nothing here keeps state between queries.

use std::sync::Arc;

use serde::Serialize;

use crate::format::{Answer, Response, ResponseFormatter};
use crate::intent::{Classification, Intent, IntentClassifier, Thresholds};
use crate::knowledge::{KnowledgeBase, SearchHit};
use crate::matcher::{DEFAULT_MATCH_THRESHOLD, SimilarityMatcher};
use crate::query::Query;
use crate::question::QuestionType;
use crate::responder::{self, AdmissionsResponder, GuidanceResponder, Responder};
use crate::Result;

/// Dispatches classified queries to responders
#[derive(Debug, Clone)]
pub struct Router {
    admissions: AdmissionsResponder,
    guidance: GuidanceResponder,
}

impl Router {
    /// Build both responders over shared knowledge
    #[must_use]
    pub fn new(knowledge: &Arc<KnowledgeBase>, matcher: &Arc<SimilarityMatcher>) -> Self {
        Self {
            admissions: AdmissionsResponder::new(Arc::clone(knowledge), Arc::clone(matcher)),
            guidance: GuidanceResponder::new(Arc::clone(knowledge), Arc::clone(matcher)),
        }
    }

    /// Responder serving an intent, `None` for out of scope
    #[must_use]
    pub fn responder(&self, intent: Intent) -> Option<&dyn Responder> {
        match intent {
            Intent::Admissions => Some(&self.admissions),
            Intent::Guidance => Some(&self.guidance),
            Intent::OutOfScope => None,
        }
    }

    /// Answer a query with the responder for its intent
    ///
    /// Out-of-scope queries get the fixed decline answer
    #[must_use]
    pub fn dispatch(&self, query: &Query, intent: Intent, question_type: QuestionType) -> Answer {
        match self.responder(intent) {
            Some(responder) => {
                tracing::debug!(intent = %intent, category = %responder.category(), "dispatching");
                responder.respond(query, question_type)
            }
            None => responder::decline(),
        }
    }
}

/// Tunables of the answering pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeskOptions {
    /// Classifier thresholds
    pub thresholds: Thresholds,
    /// Minimum score for a responder to pick an entry
    pub match_threshold: f64,
    /// Drop stopwords before scoring
    pub ignore_stopwords: bool,
}

impl Default for DeskOptions {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            ignore_stopwords: true,
        }
    }
}

/// How a query would be handled, without answering it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    /// Normalized query text
    pub normalized: String,
    /// Tokens before stopword removal
    pub tokens: Vec<String>,
    /// Extracted question type
    pub question_type: QuestionType,
    /// Classifier output
    pub classification: Classification,
}

/// Classifier, router and formatter over one knowledge base
#[derive(Debug, Clone)]
pub struct Desk {
    knowledge: Arc<KnowledgeBase>,
    matcher: Arc<SimilarityMatcher>,
    classifier: IntentClassifier,
    router: Router,
    formatter: ResponseFormatter,
}

impl Desk {
    /// Assemble the pipeline
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any threshold is outside `(0, 1]`
    pub fn new(knowledge: KnowledgeBase, options: DeskOptions) -> Result<Self> {
        let knowledge = Arc::new(knowledge);
        let matcher = Arc::new(
            SimilarityMatcher::new(options.match_threshold)?
                .ignore_stopwords(options.ignore_stopwords),
        );
        let classifier =
            IntentClassifier::new(Arc::clone(&knowledge), Arc::clone(&matcher), options.thresholds)?;
        let router = Router::new(&knowledge, &matcher);

        tracing::debug!(
            out_of_scope = options.thresholds.out_of_scope,
            in_scope = options.thresholds.in_scope,
            matching = options.match_threshold,
            ignore_stopwords = options.ignore_stopwords,
            "desk ready"
        );

        Ok(Self {
            knowledge,
            matcher,
            classifier,
            router,
            formatter: ResponseFormatter,
        })
    }

    /// Pipeline over the bundled knowledge with default options
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled knowledge fails validation
    pub fn bundled() -> Result<Self> {
        Self::new(KnowledgeBase::bundled()?, DeskOptions::default())
    }

    /// Knowledge the desk answers from
    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Classify a query without answering it
    #[must_use]
    pub fn classify(&self, query: &Query) -> Classification {
        self.classifier.classify(query)
    }

    /// Classification plus question type for raw text
    #[must_use]
    pub fn explain(&self, text: &str) -> Explanation {
        let query = Query::new(text);
        Explanation {
            normalized: query.normalized().to_string(),
            tokens: query.tokens().to_vec(),
            question_type: QuestionType::of(&query),
            classification: self.classify(&query),
        }
    }

    /// Answer raw query text
    #[must_use]
    pub fn answer(&self, text: &str) -> Response {
        self.respond(&Query::new(text))
    }

    /// Answer an already normalized query
    #[must_use]
    pub fn respond(&self, query: &Query) -> Response {
        let classification = self.classifier.classify(query);
        let question_type = QuestionType::of(query);
        let answer = self.router.dispatch(query, classification.intent, question_type);

        tracing::debug!(
            intent = %classification.intent,
            question_type = %question_type,
            confidence = classification.confidence,
            keys = ?answer.keys,
            "answered query"
        );

        self.formatter.assemble(&classification, question_type, answer)
    }

    /// Keyword search across both categories
    #[must_use]
    pub fn search(&self, text: &str, top_k: usize) -> Vec<SearchHit<'_>> {
        let terms = Query::new(text).terms(self.matcher.ignores_stopwords());
        self.knowledge.search(&terms, top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::Category;

    fn desk() -> Desk {
        Desk::bundled().unwrap()
    }

    #[test]
    fn test_router_covers_every_intent() {
        let desk = desk();
        assert_eq!(
            desk.router.responder(Intent::Admissions).map(|r| r.category()),
            Some(Category::Admissions)
        );
        assert_eq!(
            desk.router.responder(Intent::Guidance).map(|r| r.category()),
            Some(Category::Guidance)
        );
        assert!(desk.router.responder(Intent::OutOfScope).is_none());
    }

    #[test]
    fn test_out_of_scope_dispatch_declines() {
        let desk = desk();
        let query = Query::new("anything");
        let answer = desk.router.dispatch(&query, Intent::OutOfScope, QuestionType::Other);
        assert_eq!(answer, responder::decline());
    }

    #[test]
    fn test_answer_admissions() {
        let response = desk().answer("What are the requirements for a Master's degree?");
        assert_eq!(response.intent, Intent::Admissions);
        assert_eq!(response.question_type, QuestionType::What);
        assert_eq!(response.keys, ["master"]);
        assert!(response.text.contains("Requirements:"));
    }

    #[test]
    fn test_answer_guidance_how() {
        let response = desk().answer("How can I improve my grades and study more effectively?");
        assert_eq!(response.intent, Intent::Guidance);
        assert_eq!(response.question_type, QuestionType::How);
        assert_eq!(response.keys, ["study_skills"]);
        assert!(response.text.starts_with("Strategies:"));
    }

    #[test]
    fn test_bare_deadline_is_admissions() {
        let response = desk().answer("When is the deadline?");
        assert_eq!(response.intent, Intent::Admissions);
        assert_eq!(response.question_type, QuestionType::When);
        assert_eq!(response.keys, ["general"]);
    }

    #[test]
    fn test_named_degree_beats_generic_fees_alias() {
        let response = desk().answer("What are the tuition fees for a bachelor degree?");
        assert_eq!(response.intent, Intent::Admissions);
        assert_eq!(response.keys, ["bachelor"]);
        assert!(response.text.contains("$12,500"));
    }

    #[test]
    fn test_singular_without_literal_overlap_declines() {
        let desk = desk();
        let classification = desk.classify(&Query::new("grade"));
        assert_eq!(classification.intent, Intent::OutOfScope);
        assert!(classification.guidance_score.abs() < f64::EPSILON);
        assert!(classification.admissions_score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_answer_is_idempotent() {
        let desk = desk();
        let query = Query::new("When is the application deadline for a PhD?");
        assert_eq!(desk.respond(&query), desk.respond(&query));
    }

    #[test]
    fn test_explain_reports_question_type() {
        let explanation = desk().explain("What's the weather today?");
        assert_eq!(explanation.question_type, QuestionType::What);
        assert_eq!(explanation.classification.intent, Intent::OutOfScope);
        assert_eq!(explanation.tokens, ["what", "the", "weather", "today"]);
    }

    #[test]
    fn test_invalid_options_fail_fast() {
        let options = DeskOptions {
            match_threshold: 0.0,
            ..DeskOptions::default()
        };
        let err = Desk::new(KnowledgeBase::bundled().unwrap(), options).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_search_ranks_by_overlap() {
        let desk = desk();
        let hits = desk.search("career internship resume", 3);
        assert_eq!(hits.first().map(|h| h.key), Some("career_planning"));
        assert!(hits.len() <= 3);
    }
}
