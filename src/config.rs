//! Runtime configuration loaded from `config.yaml`.
//!
//! Every key is optional. API keys are normally supplied through the
//! `NEWS_API_KEY` and `GEMINI_API_KEY` environment variables, which take
//! precedence over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};
use url::Url;

use crate::quiz::SegmenterKind;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org/v2/top-headlines";
const DEFAULT_SUMMARIZER_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.0-pro:generateContent";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("cache_ttl_secs cannot be 0")]
    InvalidCacheTtl,

    #[error("invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// `generateContent` endpoint of the model used for summaries.
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_retries: usize,
    pub base_delay_ms: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SUMMARIZER_ENDPOINT.to_string(),
            api_key: None,
            max_retries: 3,
            base_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub news_api_base_url: String,
    pub news_api_key: Option<String>,
    /// Two-letter country code for top headlines.
    pub country: String,
    pub cache_ttl_secs: u64,
    /// Headline cache file. Defaults to `news_quiz/headlines.json` under the
    /// platform cache directory.
    pub cache_file: Option<String>,
    pub summarizer: SummarizerConfig,
    pub segmenter: SegmenterKind,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            news_api_base_url: DEFAULT_NEWS_API_BASE_URL.to_string(),
            news_api_key: None,
            country: "us".to_string(),
            cache_ttl_secs: 300,
            cache_file: None,
            summarizer: SummarizerConfig::default(),
            segmenter: SegmenterKind::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from `./config.yaml` when it
    /// exists, or fall back to defaults. Environment overrides are applied
    /// and the result is validated.
    #[instrument(level = "info")]
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => {
                debug!("No config file found; using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        info!(
            country = %config.country,
            news_api_key = if config.news_api_key.is_some() { "configured" } else { "missing" },
            summarizer_key = if config.summarizer.api_key.is_some() { "configured" } else { "missing" },
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not to a mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Where headline listings are cached between runs, if anywhere.
    pub fn cache_path(&self) -> Option<PathBuf> {
        match &self.cache_file {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::cache_dir().map(|d| d.join("news_quiz").join("headlines.json")),
        }
    }

    /// Override keys from the environment through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty("NEWS_API_KEY") {
            self.news_api_key = Some(key);
        }
        if let Some(key) = non_empty("GEMINI_API_KEY") {
            self.summarizer.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidCacheTtl);
        }
        for (field, value) in [
            ("news_api_base_url", &self.news_api_base_url),
            ("summarizer.endpoint", &self.summarizer.endpoint),
        ] {
            if Url::parse(value).is_err() {
                return Err(ConfigError::InvalidUrl {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.country, "us");
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.segmenter, SegmenterKind::Naive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
country: gb
segmenter: trimmed
summarizer:
  max_retries: 5
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.country, "gb");
        assert_eq!(config.segmenter, SegmenterKind::Trimmed);
        assert_eq!(config.summarizer.max_retries, 5);
        assert_eq!(config.summarizer.base_delay_ms, 1000);
        assert_eq!(config.news_api_base_url, DEFAULT_NEWS_API_BASE_URL);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = AppConfig::from_yaml("\n").unwrap();
        assert_eq!(config.cache_ttl_secs, 300);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = AppConfig::from_yaml("news_api_key: from-file").unwrap();
        config.apply_env(|key| match key {
            "NEWS_API_KEY" => Some("from-env".to_string()),
            "GEMINI_API_KEY" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.news_api_key.as_deref(), Some("from-env"));
        assert!(config.summarizer.api_key.is_none());
    }

    #[test]
    fn test_cache_path_from_file() {
        let config = AppConfig::from_yaml("cache_file: /tmp/quiz/headlines.json").unwrap();
        assert_eq!(config.cache_path(), Some(PathBuf::from("/tmp/quiz/headlines.json")));
    }

    #[test]
    fn test_default_cache_path_is_under_cache_dir() {
        let config = AppConfig::default();
        if let Some(dir) = dirs::cache_dir() {
            assert_eq!(config.cache_path(), Some(dir.join("news_quiz").join("headlines.json")));
        }
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let config = AppConfig::from_yaml("cache_ttl_secs: 0").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCacheTtl)));
    }

    #[test]
    fn test_bad_url_is_rejected() {
        let config = AppConfig::from_yaml("news_api_base_url: not a url").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { field: "news_api_base_url", .. })
        ));
    }

    #[test]
    fn test_unknown_segmenter_fails_to_parse() {
        assert!(AppConfig::from_yaml("segmenter: clever").is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AppConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
