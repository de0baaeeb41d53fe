//! Question-type extraction
//!
//! Tags a query with the kind of answer it expects. The tag only shapes
//! how a responder frames its answer; it never affects classification.

use serde::Serialize;

use crate::query::{Query, tokenize};

/// How many leading tokens are scanned for an embedded interrogative
const SCAN_WINDOW: usize = 5;

/// Kind of answer a query expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionType {
    /// Facts and requirements
    What,
    /// Steps and strategies
    How,
    /// Dates and deadlines
    When,
    /// Reasons and background
    Why,
    /// No interrogative found
    Other,
}

impl QuestionType {
    /// Map a single lowercase word to a question type
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "what" | "which" | "who" | "whom" | "where" => Some(Self::What),
            "how" => Some(Self::How),
            "when" => Some(Self::When),
            "why" => Some(Self::Why),
            _ => None,
        }
    }

    /// Tag an already normalized query
    ///
    /// The first token decides when it is interrogative; otherwise the
    /// first five tokens are scanned in order
    #[must_use]
    pub fn of(query: &Query) -> Self {
        classify_tokens(query.tokens())
    }

    /// Tag raw query text
    #[must_use]
    pub fn extract(text: &str) -> Self {
        classify_tokens(&tokenize(&text.trim().to_lowercase()))
    }

    /// Stable uppercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::What => "WHAT",
            Self::How => "HOW",
            Self::When => "WHEN",
            Self::Why => "WHY",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn classify_tokens(tokens: &[String]) -> QuestionType {
    tokens
        .iter()
        .take(SCAN_WINDOW)
        .find_map(|t| QuestionType::from_word(t))
        .unwrap_or(QuestionType::Other)
}
