//! TOML configuration file loading
//!
//! Supports `~/.config/student-desk/config.toml` as a persistent config
//! source. All fields are optional; the file is a partial overlay on top of
//! defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct DeskConfigFile {
    /// Knowledge source
    #[serde(default)]
    pub knowledge: KnowledgeFileConfig,

    /// Scoring thresholds
    #[serde(default)]
    pub thresholds: ThresholdsFileConfig,

    /// Tokenization settings
    #[serde(default)]
    pub tokens: TokensFileConfig,
}

/// Knowledge source configuration
#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeFileConfig {
    /// Knowledge file (TOML or JSON); bundled knowledge when unset
    pub path: Option<String>,
}

/// Threshold overrides, each in `(0, 1]`
#[derive(Debug, Default, Deserialize)]
pub struct ThresholdsFileConfig {
    /// Minimum out-of-scope score to decline
    pub out_of_scope: Option<f64>,

    /// Minimum in-scope score to accept
    pub in_scope: Option<f64>,

    /// Minimum score for a responder to pick an entry
    #[serde(rename = "match")]
    pub matching: Option<f64>,
}

/// Tokenization configuration
#[derive(Debug, Default, Deserialize)]
pub struct TokensFileConfig {
    /// Drop stopwords before scoring
    pub ignore_stopwords: Option<bool>,
}

/// Load the TOML config file from the standard path
///
/// Returns `DeskConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> DeskConfigFile {
    config_file_path().map_or_else(DeskConfigFile::default, |path| load_config_from(&path))
}

/// Load a TOML config file from an explicit path
///
/// Same fallback rules as [`load_config_file`]
pub fn load_config_from(path: &Path) -> DeskConfigFile {
    if !path.exists() {
        return DeskConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                DeskConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            DeskConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/student-desk/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("student-desk").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config: DeskConfigFile = toml::from_str(
            r#"
            [knowledge]
            path = "/srv/desk/knowledge.toml"

            [thresholds]
            out_of_scope = 0.3
            in_scope = 0.2
            match = 0.1

            [tokens]
            ignore_stopwords = false
            "#,
        )
        .unwrap();

        assert_eq!(config.knowledge.path.as_deref(), Some("/srv/desk/knowledge.toml"));
        assert_eq!(config.thresholds.out_of_scope, Some(0.3));
        assert_eq!(config.thresholds.in_scope, Some(0.2));
        assert_eq!(config.thresholds.matching, Some(0.1));
        assert_eq!(config.tokens.ignore_stopwords, Some(false));
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: DeskConfigFile = toml::from_str("").unwrap();
        assert!(config.knowledge.path.is_none());
        assert!(config.thresholds.out_of_scope.is_none());
        assert!(config.tokens.ignore_stopwords.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml"));
        assert!(config.knowledge.path.is_none());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[thresholds\nin_scope = ").unwrap();

        let config = load_config_from(&path);
        assert!(config.thresholds.in_scope.is_none());
    }
}
