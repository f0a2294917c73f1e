//! Type definitions for the news module.

use serde::{Deserialize, Serialize};

/// One day's headline as carried through the pipeline. Immutable once the
/// batch fetch completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    /// Unique within the batch, assigned by enumeration order.
    pub news_id: i64,
    pub headline: String,
    /// Headline plus description with publication-related words removed;
    /// the text entities are extracted from and scored against.
    pub news: String,
    pub news_image: String,
    pub news_url: String,
}

// Wire format of the top-headlines endpoint

#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
pub struct NewsApiArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "urlToImage")]
    pub url_to_image: Option<String>,
    pub source: NewsApiSource,
}

#[derive(Debug, Deserialize)]
pub struct NewsApiSource {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_top_headlines_payload() {
        let payload = json!({
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": null, "name": "The Verge"},
                "title": "Sony announces WF-1000XM4 earbuds",
                "description": "The new earbuds improve on the last model.",
                "url": "https://example.com/article",
                "urlToImage": "https://example.com/image.jpg",
            }]
        });

        let response: NewsApiResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.status, "ok");
        assert_eq!(response.articles.len(), 1);
        assert_eq!(response.articles[0].source.name.as_deref(), Some("The Verge"));
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let payload = json!({
            "status": "ok",
            "articles": [{
                "source": {},
                "title": "Headline without trimmings",
            }]
        });

        let response: NewsApiResponse = serde_json::from_value(payload).unwrap();
        let article = &response.articles[0];
        assert!(article.description.is_none());
        assert!(article.url_to_image.is_none());
        assert!(article.source.name.is_none());
    }
}
