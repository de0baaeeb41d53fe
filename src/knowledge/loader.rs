//! Knowledge file loading
//!
//! Knowledge files are TOML (default) or JSON, chosen by extension:
//!
//! ```toml
//! out_of_scope = ["weather", "sports scores"]
//!
//! [[admissions]]
//! key = "master"
//! title = "Master's programs"
//! pattern = "master degree requirements"
//! aliases = ["graduate admission"]
//! summary = "..."
//! requirements = ["..."]
//! deadline = "..."
//! fees = "..."
//! steps = ["..."]
//!
//! [[guidance]]
//! key = "study_skills"
//! title = "Study skills"
//! pattern = "improve grades study effectively"
//! summary = "..."
//! strategies = ["..."]
//! resources = ["..."]
//! ```

use std::path::Path;

use serde::Deserialize;

use super::base::KnowledgeBase;
use super::types::{AdmissionsFacts, GuidanceFacts, KnowledgeEntry, Lexicon, Payload};
use crate::Result;

/// Knowledge tables compiled into the binary
const BUNDLED_KNOWLEDGE: &str = include_str!("../../knowledge/default.toml");

/// Top-level knowledge file schema
#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeFile {
    /// Phrases that mark a query as out of scope
    #[serde(default)]
    pub out_of_scope: Vec<String>,

    /// Admissions entries
    #[serde(default)]
    pub admissions: Vec<AdmissionsRecord>,

    /// Guidance entries
    #[serde(default)]
    pub guidance: Vec<GuidanceRecord>,
}

/// Admissions entry as written in a knowledge file
#[derive(Debug, Deserialize)]
pub struct AdmissionsRecord {
    pub key: String,
    #[serde(default)]
    pub title: String,
    pub pattern: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(flatten)]
    pub facts: AdmissionsFacts,
}

/// Guidance entry as written in a knowledge file
#[derive(Debug, Deserialize)]
pub struct GuidanceRecord {
    pub key: String,
    #[serde(default)]
    pub title: String,
    pub pattern: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(flatten)]
    pub facts: GuidanceFacts,
}

impl KnowledgeFile {
    /// Parse TOML knowledge
    ///
    /// # Errors
    ///
    /// Returns `Error::Toml` on malformed input
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse JSON knowledge
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` on malformed input
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate and convert into a knowledge base
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is invalid or the base fails validation
    pub fn into_knowledge_base(self) -> Result<KnowledgeBase> {
        let admissions = self
            .admissions
            .into_iter()
            .map(|r| {
                KnowledgeEntry::new(&r.key, &r.title, &r.pattern, Payload::Admissions(r.facts))
                    .map(|e| e.with_aliases(&r.aliases))
            })
            .collect::<Result<Vec<_>>>()?;

        let guidance = self
            .guidance
            .into_iter()
            .map(|r| {
                KnowledgeEntry::new(&r.key, &r.title, &r.pattern, Payload::Guidance(r.facts))
                    .map(|e| e.with_aliases(&r.aliases))
            })
            .collect::<Result<Vec<_>>>()?;

        KnowledgeBase::new(
            Lexicon::new("out_of_scope", &self.out_of_scope),
            admissions,
            guidance,
        )
    }
}

impl KnowledgeBase {
    /// Knowledge base built from the bundled default tables
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled file is invalid
    pub fn bundled() -> Result<Self> {
        KnowledgeFile::from_toml(BUNDLED_KNOWLEDGE)?.into_knowledge_base()
    }

    /// Load a knowledge base from a TOML or JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let file = if is_json {
            KnowledgeFile::from_json(&content)?
        } else {
            KnowledgeFile::from_toml(&content)?
        };

        let kb = file.into_knowledge_base()?;
        tracing::info!(
            path = %path.display(),
            admissions = kb.entries(super::Category::Admissions).len(),
            guidance = kb.entries(super::Category::Guidance).len(),
            "loaded knowledge file"
        );
        Ok(kb)
    }
}
