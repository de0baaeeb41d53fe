//! Knowledge tables: categories, entries, payloads and lexicons

use serde::{Deserialize, Serialize};

use crate::query::{TokenSet, tokenize};
use crate::{Error, Result};

/// In-scope knowledge category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Admissions facts (requirements, deadlines, fees)
    Admissions,
    /// Academic guidance (study strategies, resources)
    Guidance,
}

impl Category {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admissions => "admissions",
            Self::Guidance => "guidance",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admissions facts for one degree level or applicant type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionsFacts {
    /// One-paragraph overview
    pub summary: String,

    /// Entry requirements
    #[serde(default)]
    pub requirements: Vec<String>,

    /// Application deadline
    #[serde(default)]
    pub deadline: Option<String>,

    /// Application and tuition fees
    #[serde(default)]
    pub fees: Option<String>,

    /// Application steps, in order
    #[serde(default)]
    pub steps: Vec<String>,
}

/// Guidance facts for one topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceFacts {
    /// One-paragraph overview
    pub summary: String,

    /// Recommended strategies
    #[serde(default)]
    pub strategies: Vec<String>,

    /// Campus services and material to consult
    #[serde(default)]
    pub resources: Vec<String>,
}

/// Structured payload of a knowledge entry
///
/// The variant fixes the entry's category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Admissions(AdmissionsFacts),
    Guidance(GuidanceFacts),
}

impl Payload {
    /// Category implied by the payload variant
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Admissions(_) => Category::Admissions,
            Self::Guidance(_) => Category::Guidance,
        }
    }
}

/// A tokenized phrase usable as a match candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    text: String,
    terms: TokenSet,
    all_terms: TokenSet,
}

impl Phrase {
    /// Tokenize a phrase
    #[must_use]
    pub fn new(text: &str) -> Self {
        let tokens = tokenize(&text.trim().to_lowercase());
        let terms = TokenSet::from_tokens(&tokens, true);
        let all_terms = TokenSet::from_tokens(&tokens, false);

        Self {
            text: text.trim().to_string(),
            terms,
            all_terms,
        }
    }

    /// Phrase as written
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Scoring terms, with or without stopwords
    #[must_use]
    pub const fn terms(&self, ignore_stopwords: bool) -> &TokenSet {
        if ignore_stopwords {
            &self.terms
        } else {
            &self.all_terms
        }
    }

    /// Whether the phrase produced no words
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all_terms.is_empty()
    }

    /// Whether the phrase has no terms once stopwords are dropped
    #[must_use]
    pub fn is_stopwords_only(&self) -> bool {
        self.terms.is_empty()
    }
}

/// A named, duplicate-free set of phrases representing a topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    name: String,
    phrases: Vec<Phrase>,
}

impl Lexicon {
    /// Build a lexicon, skipping blank phrases and duplicates
    ///
    /// Two phrases are duplicates when they produce the same term set;
    /// the first one wins so insertion order stays meaningful for tie-breaks
    #[must_use]
    pub fn new<I, S>(name: &str, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Self {
            name: name.to_string(),
            phrases: Vec::new(),
        };
        for phrase in phrases {
            lexicon.push(Phrase::new(phrase.as_ref()));
        }
        lexicon
    }

    fn push(&mut self, phrase: Phrase) {
        if phrase.is_empty() {
            return;
        }
        let duplicate = self
            .phrases
            .iter()
            .any(|p| p.terms(false) == phrase.terms(false));
        if !duplicate {
            self.phrases.push(phrase);
        }
    }

    /// Lexicon name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Phrases in insertion order
    #[must_use]
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    /// Number of phrases
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Whether the lexicon is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// A structured fact record belonging to exactly one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    key: String,
    title: String,
    subject: TokenSet,
    pattern: Phrase,
    aliases: Vec<Phrase>,
    keywords: TokenSet,
    payload: Payload,
}

impl KnowledgeEntry {
    /// Create an entry
    ///
    /// # Errors
    ///
    /// Returns `Error::Knowledge` if the key is blank or the pattern has no
    /// words besides stopwords
    pub fn new(key: &str, title: &str, pattern: &str, payload: Payload) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::Knowledge("entry key must not be empty".to_string()));
        }

        let pattern = Phrase::new(pattern);
        if pattern.is_empty() {
            return Err(Error::Knowledge(format!("entry {key} has an empty pattern")));
        }
        if pattern.is_stopwords_only() {
            return Err(Error::Knowledge(format!(
                "entry {key} has a pattern made only of stopwords: {:?}",
                pattern.text()
            )));
        }

        let title = if title.trim().is_empty() {
            key.to_string()
        } else {
            title.trim().to_string()
        };

        let mut keywords = pattern.terms(true).clone();
        keywords.extend(&TokenSet::from_text(&title, true));

        Ok(Self {
            key: key.to_string(),
            subject: TokenSet::from_text(&key.replace(['_', '-'], " "), true),
            title,
            pattern,
            aliases: Vec::new(),
            keywords,
            payload,
        })
    }

    /// Add alternate phrasings that also select this entry
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for alias in aliases {
            let phrase = Phrase::new(alias.as_ref());
            if phrase.is_stopwords_only() {
                continue;
            }
            self.keywords.extend(phrase.terms(true));
            self.aliases.push(phrase);
        }
        self
    }

    /// Unique entry key (degree level or topic name)
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human-readable title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Category implied by the payload
    #[must_use]
    pub const fn category(&self) -> Category {
        self.payload.category()
    }

    /// Whether every word of the entry key appears in `terms`
    ///
    /// `master` is named by "fees for a master's degree"; `study_skills`
    /// needs both `study` and `skills`
    #[must_use]
    pub fn is_named_by(&self, terms: &TokenSet) -> bool {
        !self.subject.is_empty() && self.subject.iter().all(|t| terms.contains(t))
    }

    /// Alternate phrasings
    #[must_use]
    pub fn aliases(&self) -> &[Phrase] {
        &self.aliases
    }

    /// Pattern followed by aliases
    pub fn phrases(&self) -> impl Iterator<Item = &Phrase> {
        std::iter::once(&self.pattern).chain(self.aliases.iter())
    }

    /// Union of pattern, alias and title terms, used by keyword search
    #[must_use]
    pub const fn keywords(&self) -> &TokenSet {
        &self.keywords
    }

    /// Structured payload
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }
}
