//! Typed configuration for the batch pipeline.
//!
//! All tunables live in one YAML file deserialized into `AppConfig` and
//! passed by value into each component constructor. The only ambient state
//! is the news API key, which is read from `NEWS_API_KEY` when the news
//! client is built and whose absence is a fatal configuration error.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::entity::EntityLabel;
use crate::error::{Error, Result};

pub const NEWS_API_KEY_VAR: &str = "NEWS_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub news: NewsConfig,
    pub wiki: WikiConfig,
    pub entities: EntityConfig,
    pub filter: FilterConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Top-headlines endpoint, e.g. https://newsapi.org/v2/top-headlines
    pub url: String,
    pub country: String,
    pub page_size: u32,
    /// Publication-related words stripped from headline text before
    /// entity extraction, in addition to each article's source name.
    #[serde(default)]
    pub source_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// MediaWiki API endpoint, e.g. https://en.wikipedia.org/w/api.php
    pub url: String,
    /// How many search results to consider per entity.
    pub n_results: usize,
    /// Lowercased category titles that disqualify a candidate page.
    #[serde(default)]
    pub stop_categories: Vec<String>,
    /// Phrases that disqualify a candidate when found in its extract.
    #[serde(default)]
    pub stop_phrases: Vec<String>,
    /// What to do with candidates whose page metadata has no category list.
    #[serde(default)]
    pub missing_category_policy: MissingCategoryPolicy,
}

/// Policy for candidates whose page metadata carries no category list.
///
/// The reference behavior is `Allow`: absence of categories means there is
/// nothing to match a stop-category against, so the candidate passes. The
/// stricter reading treats absence as "cannot verify, reject".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingCategoryPolicy {
    #[default]
    Allow,
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Entity labels worth resolving against Wikipedia.
    pub wanted_labels: Vec<EntityLabel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Similarity score above which a (headline, extract) pair is relevant.
    pub threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 300 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/entries.db".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let raw = fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
            path: path_str.clone(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path_str,
            source,
        })
    }
}

/// Read the news API key from the environment. Empty counts as missing.
pub fn news_api_key() -> Result<String> {
    match env::var(NEWS_API_KEY_VAR) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(Error::MissingApiKey(NEWS_API_KEY_VAR)),
    }
}
