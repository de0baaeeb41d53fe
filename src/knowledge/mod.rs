//! Knowledge tables consumed by the desk
//!
//! - **types**: categories, entries, payloads and lexicons
//! - **base**: the validated, immutable knowledge base and keyword search
//! - **loader**: TOML/JSON knowledge files and the bundled defaults

mod base;
mod loader;
mod types;

pub use base::{KnowledgeBase, SearchHit};
pub use loader::{AdmissionsRecord, GuidanceRecord, KnowledgeFile};
pub use types::{
    AdmissionsFacts, Category, GuidanceFacts, KnowledgeEntry, Lexicon, Payload, Phrase,
};
