//! Student Desk - Admissions and academic guidance question routing
//!
//! This library provides the core of the desk:
//! - Query normalization and lexical-overlap scoring
//! - Intent classification (admissions, guidance, out of scope)
//! - Knowledge-backed responders framed by question type
//! - Deterministic response rendering
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  Query (raw text)                    │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │   IntentClassifier  │  QuestionType  │  Matcher      │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │   Router: Admissions │ Guidance │ decline            │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │               ResponseFormatter                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Knowledge is loaded once and shared read-only; no state survives a query.

pub mod config;
pub mod error;
pub mod format;
pub mod intent;
pub mod knowledge;
pub mod matcher;
pub mod query;
pub mod question;
pub mod responder;
pub mod router;

pub use config::Config;
pub use error::{Error, Result};
pub use format::{Answer, Response, ResponseFormatter, Section, SectionBody};
pub use intent::{Basis, Classification, ConfidenceLevel, Intent, IntentClassifier, Thresholds};
pub use knowledge::{
    AdmissionsFacts, Category, GuidanceFacts, KnowledgeBase, KnowledgeEntry, Lexicon, Payload,
    SearchHit,
};
pub use matcher::{JaccardScorer, MatchResult, Score, Scorer, SimilarityMatcher};
pub use query::{Query, TokenSet};
pub use question::QuestionType;
pub use responder::{AdmissionsResponder, GuidanceResponder, Responder};
pub use router::{Desk, DeskOptions, Explanation, Router};
