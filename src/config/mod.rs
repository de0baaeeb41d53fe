//! Runtime configuration for the desk
//!
//! Sources are layered defaults < config file < environment. The CLI applies
//! its flags on top of the loaded value.

pub mod file;

use std::path::PathBuf;

use crate::intent::Thresholds;
use crate::knowledge::KnowledgeBase;
use crate::router::{Desk, DeskOptions};
use crate::{Error, Result};

use file::DeskConfigFile;

/// Resolved desk configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Knowledge file; bundled knowledge when `None`
    pub knowledge_path: Option<PathBuf>,

    /// Pipeline tunables
    pub options: DeskOptions,
}

impl Config {
    /// Load configuration from the config file and environment
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if an environment override cannot be parsed
    pub fn load() -> Result<Self> {
        Self::from_sources(file::load_config_file(), |key| std::env::var(key).ok())
    }

    /// Overlay a parsed config file and an environment lookup on defaults
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if an environment override cannot be parsed
    pub fn from_sources(
        fc: DeskConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let defaults = DeskOptions::default();

        let knowledge_path = env("DESK_KNOWLEDGE_PATH")
            .or(fc.knowledge.path)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let out_of_scope = env_f64(&env, "DESK_OUT_OF_SCOPE_THRESHOLD")?
            .or(fc.thresholds.out_of_scope)
            .unwrap_or(defaults.thresholds.out_of_scope);
        let in_scope = env_f64(&env, "DESK_IN_SCOPE_THRESHOLD")?
            .or(fc.thresholds.in_scope)
            .unwrap_or(defaults.thresholds.in_scope);
        let match_threshold = env_f64(&env, "DESK_MATCH_THRESHOLD")?
            .or(fc.thresholds.matching)
            .unwrap_or(defaults.match_threshold);

        let ignore_stopwords = env_bool(&env, "DESK_IGNORE_STOPWORDS")?
            .or(fc.tokens.ignore_stopwords)
            .unwrap_or(defaults.ignore_stopwords);

        Ok(Self {
            knowledge_path,
            options: DeskOptions {
                thresholds: Thresholds {
                    out_of_scope,
                    in_scope,
                },
                match_threshold,
                ignore_stopwords,
            },
        })
    }

    /// Load the configured knowledge, falling back to the bundled tables
    ///
    /// # Errors
    ///
    /// Returns an error if the knowledge file cannot be read, parsed or
    /// validated
    pub fn knowledge(&self) -> Result<KnowledgeBase> {
        match &self.knowledge_path {
            Some(path) => KnowledgeBase::load(path),
            None => KnowledgeBase::bundled(),
        }
    }

    /// Build the answering pipeline this configuration describes
    ///
    /// # Errors
    ///
    /// Returns an error if knowledge loading fails or a threshold is out of
    /// range
    pub fn desk(&self) -> Result<Desk> {
        Desk::new(self.knowledge()?, self.options)
    }
}

fn env_f64(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<f64>> {
    env(key)
        .map(|raw| {
            raw.trim()
                .parse::<f64>()
                .map_err(|e| Error::Config(format!("{key}={raw}: {e}")))
        })
        .transpose()
}

/// Accepts `true`/`false` in any case, or `1`/`0`
fn env_bool(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<bool>> {
    env(key)
        .map(|raw| match raw.trim().to_lowercase().as_str() {
            "1" => Ok(true),
            "0" => Ok(false),
            value => value
                .parse::<bool>()
                .map_err(|e| Error::Config(format!("{key}={raw}: {e}"))),
        })
        .transpose()
}
