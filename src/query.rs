//! Query normalization and tokenization
//!
//! Every piece of text that takes part in scoring (queries, entry patterns,
//! lexicon phrases) goes through the same pipeline:
//!
//! 1. lowercase and trim
//! 2. split into alphanumeric words, keeping inner apostrophes
//! 3. drop possessive `'s` and remaining apostrophes (`master's` -> `master`)
//! 4. optionally drop stopwords
//!
//! Scoring terms are always a subset of the query's tokens; no stemming or
//! synonym expansion happens.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Regex for words, allowing inner straight or curly apostrophes
static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['\x{2019}][\p{L}]+)*").expect("valid regex")
});

/// Words that carry no topical signal for overlap scoring
const STOPWORDS: &[&str] = &[
    "a", "about", "also", "am", "an", "and", "any", "are", "as", "at", "be", "been", "being",
    "but", "by", "can", "could", "did", "do", "does", "for", "from", "get", "had", "has",
    "have", "here", "how", "i", "if", "in", "into", "is", "it", "its", "just", "know", "like",
    "may", "me", "might", "more", "most", "much", "must", "my", "need", "of", "on", "or",
    "our", "out", "please", "shall", "should", "so", "some", "tell", "than", "that", "the",
    "then", "there", "these", "this", "those", "to", "up", "very", "want", "was", "we",
    "were", "what", "when", "where", "which", "who", "whom", "why", "will", "with", "would",
    "you", "your",
];

/// A normalized user query
///
/// Immutable once created; all scoring reads from the cached token list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    normalized: String,
    tokens: Vec<String>,
}

impl Query {
    /// Normalize raw query text
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = raw.trim().to_lowercase();
        let tokens = tokenize(&normalized);

        Self {
            raw,
            normalized,
            tokens,
        }
    }

    /// Original text as received
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercased, trimmed text
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Words in order of appearance, before stopword removal
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether normalization produced no words at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Scoring terms for this query
    #[must_use]
    pub fn terms(&self, ignore_stopwords: bool) -> TokenSet {
        TokenSet::from_tokens(&self.tokens, ignore_stopwords)
    }
}

/// An ordered, duplicate-free set of scoring terms
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TokenSet(BTreeSet<String>);

impl TokenSet {
    /// Tokenize free text into a term set
    #[must_use]
    pub fn from_text(text: &str, ignore_stopwords: bool) -> Self {
        Self::from_tokens(&tokenize(&text.to_lowercase()), ignore_stopwords)
    }

    /// Build a term set from already tokenized words
    #[must_use]
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], ignore_stopwords: bool) -> Self {
        Self(
            tokens
                .iter()
                .map(|t| t.as_ref())
                .filter(|t| !(ignore_stopwords && is_stopword(t)))
                .map(ToString::to_string)
                .collect(),
        )
    }

    /// Number of distinct terms
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no terms
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the set holds `term`
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(term)
    }

    /// Iterate terms in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Size of the intersection with `other`
    #[must_use]
    pub fn overlap(&self, other: &Self) -> usize {
        self.0.intersection(&other.0).count()
    }

    /// Size of the union with `other`
    #[must_use]
    pub fn union_len(&self, other: &Self) -> usize {
        self.len() + other.len() - self.overlap(other)
    }

    /// Add every term of `other` to this set
    pub fn extend(&mut self, other: &Self) {
        self.0.extend(other.0.iter().cloned());
    }
}

/// Split lowercased text into words
///
/// Possessive `'s` is dropped and other apostrophes are removed, so
/// `what's` becomes `what` and `don't` becomes `dont`
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_REGEX
        .find_iter(text)
        .map(|m| {
            let word = m.as_str();
            let word = word
                .strip_suffix("'s")
                .or_else(|| word.strip_suffix("\u{2019}s"))
                .unwrap_or(word);
            word.replace(['\'', '\u{2019}'], "")
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whether `word` is in the stopword list
#[must_use]
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word).is_ok()
}
