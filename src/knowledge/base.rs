//! Immutable knowledge base handed to the desk at construction

use std::collections::HashSet;

use serde::Serialize;

use super::types::{Category, KnowledgeEntry, Lexicon};
use crate::query::TokenSet;
use crate::{Error, Result};

/// Read-only admissions and guidance tables plus the out-of-scope lexicon
///
/// The admissions and guidance lexicons used for intent classification are
/// derived from the entries' patterns and aliases
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    out_of_scope: Lexicon,
    admissions: Vec<KnowledgeEntry>,
    guidance: Vec<KnowledgeEntry>,
    admissions_lexicon: Lexicon,
    guidance_lexicon: Lexicon,
}

/// A keyword search hit
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchHit<'a> {
    /// Matching entry key
    pub key: &'a str,
    /// Matching entry title
    pub title: &'a str,
    /// Entry category
    pub category: Category,
    /// Number of query terms found in the entry keywords
    pub overlap: usize,
}

impl KnowledgeBase {
    /// Validate and assemble a knowledge base
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the out-of-scope lexicon or either entry
    /// set is empty, or an entry sits in the wrong set; returns
    /// `Error::DuplicateEntry` if two entries share a key
    pub fn new(
        out_of_scope: Lexicon,
        admissions: Vec<KnowledgeEntry>,
        guidance: Vec<KnowledgeEntry>,
    ) -> Result<Self> {
        if out_of_scope.is_empty() {
            return Err(Error::Config("out-of-scope lexicon is empty".to_string()));
        }
        check_entries(Category::Admissions, &admissions)?;
        check_entries(Category::Guidance, &guidance)?;

        let mut seen = HashSet::new();
        for entry in admissions.iter().chain(guidance.iter()) {
            if !seen.insert(entry.key()) {
                return Err(Error::DuplicateEntry(entry.key().to_string()));
            }
        }

        let admissions_lexicon = derive_lexicon(Category::Admissions, &admissions);
        let guidance_lexicon = derive_lexicon(Category::Guidance, &guidance);

        tracing::debug!(
            out_of_scope = out_of_scope.len(),
            admissions = admissions.len(),
            guidance = guidance.len(),
            "knowledge base assembled"
        );

        Ok(Self {
            out_of_scope,
            admissions,
            guidance,
            admissions_lexicon,
            guidance_lexicon,
        })
    }

    /// Out-of-scope lexicon
    #[must_use]
    pub const fn out_of_scope(&self) -> &Lexicon {
        &self.out_of_scope
    }

    /// Entries of a category, in insertion order
    #[must_use]
    pub fn entries(&self, category: Category) -> &[KnowledgeEntry] {
        match category {
            Category::Admissions => &self.admissions,
            Category::Guidance => &self.guidance,
        }
    }

    /// Classification lexicon of a category
    #[must_use]
    pub const fn lexicon(&self, category: Category) -> &Lexicon {
        match category {
            Category::Admissions => &self.admissions_lexicon,
            Category::Guidance => &self.guidance_lexicon,
        }
    }

    /// Look up an entry by key in either category
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&KnowledgeEntry> {
        self.admissions
            .iter()
            .chain(self.guidance.iter())
            .find(|e| e.key() == key)
    }

    /// Rank entries of both categories by keyword overlap
    ///
    /// Admissions entries come before guidance entries when overlap ties
    #[must_use]
    pub fn search(&self, terms: &TokenSet, top_k: usize) -> Vec<SearchHit<'_>> {
        rank(self.admissions.iter().chain(self.guidance.iter()), terms, top_k)
    }

    /// Rank entries of a single category by keyword overlap
    #[must_use]
    pub fn search_category(
        &self,
        category: Category,
        terms: &TokenSet,
        top_k: usize,
    ) -> Vec<SearchHit<'_>> {
        rank(self.entries(category).iter(), terms, top_k)
    }
}

/// Keep entries with any overlap, best first, stable on insertion order
fn rank<'a>(
    entries: impl Iterator<Item = &'a KnowledgeEntry>,
    terms: &TokenSet,
    top_k: usize,
) -> Vec<SearchHit<'a>> {
    let mut hits: Vec<SearchHit<'a>> = entries
        .filter_map(|entry| {
            let overlap = entry.keywords().overlap(terms);
            (overlap > 0).then(|| SearchHit {
                key: entry.key(),
                title: entry.title(),
                category: entry.category(),
                overlap,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.overlap.cmp(&a.overlap));
    hits.truncate(top_k);
    hits
}

fn check_entries(category: Category, entries: &[KnowledgeEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(Error::Config(format!("{category} entry set is empty")));
    }
    if let Some(stray) = entries.iter().find(|e| e.category() != category) {
        return Err(Error::Config(format!(
            "entry {} belongs to {} but was given as {category}",
            stray.key(),
            stray.category()
        )));
    }
    Ok(())
}

fn derive_lexicon(category: Category, entries: &[KnowledgeEntry]) -> Lexicon {
    Lexicon::new(
        category.as_str(),
        entries
            .iter()
            .flat_map(KnowledgeEntry::phrases)
            .map(super::types::Phrase::text),
    )
}
