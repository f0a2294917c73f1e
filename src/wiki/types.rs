//! Type definitions for the Wikipedia module.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A Wikipedia page accepted as a candidate match for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiCandidate {
    pub entity: String,
    pub title: String,
    /// Lead summary, truncated at the first section break.
    pub extract: String,
    pub url: String,
    /// Empty string when the page has no thumbnail.
    pub thumbnail: String,
}

/// A candidate joined to its source headline id; one row of the wiki table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiMatch {
    pub news_id: i64,
    pub entity: String,
    pub title: String,
    pub wiki: String,
    pub wiki_url: String,
    pub wiki_image: String,
}

// Wire format of the MediaWiki query API

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct PagesResponse {
    #[serde(default)]
    pub query: Option<PagesQuery>,
}

#[derive(Debug, Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub pages: HashMap<String, WikiPage>,
}

/// Page content and metadata. Every field beyond the title is optional in
/// practice; absence of `categories` in particular is a policy decision
/// handled by the resolver, not a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiPage {
    pub title: String,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<CategoryRef>>,
    #[serde(default, rename = "fullurl")]
    pub full_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRef {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub source: String,
}
