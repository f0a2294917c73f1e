//! Builds the day's headline table from the raw API payload.

use tracing::info;

use super::client::NewsClient;
use super::types::{Headline, NewsApiArticle};
use crate::error::Result;
use crate::TARGET_PIPELINE;

/// Fetch and shape the day's headlines. `source_words` are
/// publication-related strings removed from the combined text, on top of
/// each article's own source name.
pub async fn load_news(client: &NewsClient, source_words: &[String]) -> Result<Vec<Headline>> {
    info!(target: TARGET_PIPELINE, "loading news from API");

    let payload = client.top_headlines().await?;
    let headlines = build_headlines(payload.articles, source_words);

    info!(target: TARGET_PIPELINE, "loaded {} headlines", headlines.len());
    Ok(headlines)
}

pub fn build_headlines(articles: Vec<NewsApiArticle>, source_words: &[String]) -> Vec<Headline> {
    articles
        .into_iter()
        .enumerate()
        .map(|(i, article)| {
            let mut news = article.title.clone();
            if let Some(description) = &article.description {
                news.push(' ');
                news.push_str(description);
            }

            if let Some(name) = &article.source.name {
                news = news.replace(name.as_str(), "");
            }
            for word in source_words {
                news = news.replace(word.as_str(), "");
            }

            Headline {
                news_id: i as i64,
                headline: article.title,
                news,
                news_image: article.url_to_image.unwrap_or_default(),
                news_url: article.url.unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::types::NewsApiSource;

    fn article(title: &str, description: Option<&str>, source: Option<&str>) -> NewsApiArticle {
        NewsApiArticle {
            title: title.to_string(),
            description: description.map(str::to_string),
            url: Some("https://example.com/a".to_string()),
            url_to_image: Some("https://example.com/i.jpg".to_string()),
            source: NewsApiSource {
                name: source.map(str::to_string),
            },
        }
    }

    #[test]
    fn assigns_sequential_ids_in_input_order() {
        let headlines = build_headlines(
            vec![
                article("First", None, None),
                article("Second", None, None),
                article("Third", None, None),
            ],
            &[],
        );
        let ids: Vec<i64> = headlines.iter().map(|h| h.news_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn appends_description_to_title() {
        let headlines = build_headlines(
            vec![article("Sony announces earbuds", Some("The new model is better."), None)],
            &[],
        );
        assert_eq!(headlines[0].headline, "Sony announces earbuds");
        assert_eq!(headlines[0].news, "Sony announces earbuds The new model is better.");
    }

    #[test]
    fn removes_source_name_and_configured_words() {
        let headlines = build_headlines(
            vec![article(
                "Markets rally - The Verge",
                Some("Stocks climbed, reports CNBC."),
                Some("The Verge"),
            )],
            &["reports CNBC.".to_string()],
        );
        let news = &headlines[0].news;
        assert!(!news.contains("The Verge"));
        assert!(!news.contains("CNBC"));
        // The original headline column keeps the raw title.
        assert!(headlines[0].headline.contains("The Verge"));
    }

    #[test]
    fn missing_image_and_url_become_empty_strings() {
        let mut bare = article("Bare", None, None);
        bare.url = None;
        bare.url_to_image = None;
        let headlines = build_headlines(vec![bare], &[]);
        assert_eq!(headlines[0].news_image, "");
        assert_eq!(headlines[0].news_url, "");
    }
}
