//! Resolves extracted entities to Wikipedia candidate articles.

use tracing::{debug, info, warn};

use super::client::WikiClient;
use super::types::{WikiCandidate, WikiMatch, WikiPage};
use crate::config::{MissingCategoryPolicy, WikiConfig};
use crate::entity::types::strip_organization_marker;
use crate::entity::EntityExtractor;
use crate::news::Headline;
use crate::{TARGET_PIPELINE, TARGET_WEB_REQUEST};

pub struct WikiResolver {
    client: WikiClient,
    n_results: usize,
    stop_categories: Vec<String>,
    stop_phrases: Vec<String>,
    missing_category_policy: MissingCategoryPolicy,
}

impl WikiResolver {
    pub fn new(client: WikiClient, config: &WikiConfig) -> Self {
        Self {
            client,
            n_results: config.n_results,
            stop_categories: config
                .stop_categories
                .iter()
                .map(|c| c.to_lowercase())
                .collect(),
            stop_phrases: config
                .stop_phrases
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
            missing_category_policy: config.missing_category_policy,
        }
    }

    /// Candidate articles for one entity, in search-rank order.
    ///
    /// Network failures on the search or on an individual candidate are
    /// logged and degrade to "this candidate yields nothing"; they never
    /// abort the batch.
    pub async fn resolve(&self, entity: &str) -> Vec<WikiCandidate> {
        let query = strip_organization_marker(entity);

        let search = match self.client.search(query).await {
            Ok(response) => response,
            Err(err) => {
                warn!(target: TARGET_WEB_REQUEST, "search for '{}' failed: {}", query, err);
                return Vec::new();
            }
        };
        let hits = search.query.map(|q| q.search).unwrap_or_default();

        let mut accepted_titles: Vec<String> = Vec::new();
        let mut candidates = Vec::new();

        for hit in hits.into_iter().take(self.n_results) {
            if accepted_titles.contains(&hit.title) {
                debug!(target: TARGET_PIPELINE, "'{}' has already been added", hit.title);
                continue;
            }

            let page = match self.client.page_content(&hit.title).await {
                Ok(Some(page)) => page,
                Ok(None) => {
                    debug!(target: TARGET_WEB_REQUEST, "no page object returned for '{}'", hit.title);
                    continue;
                }
                Err(err) => {
                    warn!(target: TARGET_WEB_REQUEST, "content fetch for '{}' failed: {}", hit.title, err);
                    continue;
                }
            };

            if !self.passes_category_filter(&page) {
                debug!(target: TARGET_PIPELINE, "'{}' rejected by stop category", page.title);
                continue;
            }

            // Absent extract means there is nothing to score or store.
            let Some(extract) = page.extract.clone() else {
                debug!(target: TARGET_PIPELINE, "'{}' has no extract", page.title);
                continue;
            };
            if self.contains_stop_phrase(&extract) {
                debug!(target: TARGET_PIPELINE, "'{}' rejected by stop phrase", page.title);
                continue;
            }

            info!(target: TARGET_PIPELINE, "{} found as a match", page.title);
            accepted_titles.push(hit.title);
            candidates.push(WikiCandidate {
                entity: entity.to_string(),
                title: page.title,
                extract: truncate_at_section_break(&extract),
                url: page.full_url.unwrap_or_default(),
                thumbnail: page.thumbnail.map(|t| t.source).unwrap_or_default(),
            });
        }

        candidates
    }

    /// False when any page category case-insensitively matches a configured
    /// stop-category. A page without a category list falls to the configured
    /// missing-category policy.
    fn passes_category_filter(&self, page: &WikiPage) -> bool {
        match &page.categories {
            Some(categories) => !categories
                .iter()
                .any(|c| self.stop_categories.contains(&c.title.to_lowercase())),
            None => self.missing_category_policy == MissingCategoryPolicy::Allow,
        }
    }

    fn contains_stop_phrase(&self, extract: &str) -> bool {
        let lowered = extract.to_lowercase();
        self.stop_phrases.iter().any(|p| lowered.contains(p))
    }
}

/// "==" marks the first section heading after the lead summary; everything
/// from there on is boilerplate ("See also", references) and is cut.
pub fn truncate_at_section_break(text: &str) -> String {
    match text.find("==") {
        Some(pos) => text[..pos].to_string(),
        None => text.to_string(),
    }
}

/// Match every headline's entities against Wikipedia. Entities and their
/// candidates are processed strictly one at a time.
pub async fn load_wiki(
    headlines: &[Headline],
    extractor: &EntityExtractor,
    resolver: &WikiResolver,
) -> Vec<WikiMatch> {
    info!(target: TARGET_PIPELINE, "matching news with wiki entries");

    let mut matches = Vec::new();
    for headline in headlines {
        let preview: String = headline.news.chars().take(25).collect();
        info!(target: TARGET_PIPELINE, "processing '{}...'", preview);

        for entity in extractor.extract(&headline.news) {
            for candidate in resolver.resolve(&entity).await {
                matches.push(WikiMatch {
                    news_id: headline.news_id,
                    entity: candidate.entity,
                    title: candidate.title,
                    wiki: candidate.extract,
                    wiki_url: candidate.url,
                    wiki_image: candidate.thumbnail,
                });
            }
        }
    }

    info!(target: TARGET_PIPELINE, "found {} candidate matches", matches.len());
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::wiki::types::CategoryRef;

    fn resolver_with(
        stop_categories: &[&str],
        stop_phrases: &[&str],
        policy: MissingCategoryPolicy,
    ) -> WikiResolver {
        let config = WikiConfig {
            url: "https://en.wikipedia.org/w/api.php".to_string(),
            n_results: 3,
            stop_categories: stop_categories.iter().map(|s| s.to_string()).collect(),
            stop_phrases: stop_phrases.iter().map(|s| s.to_string()).collect(),
            missing_category_policy: policy,
        };
        let client = WikiClient::new(&config, &HttpConfig::default()).unwrap();
        WikiResolver::new(client, &config)
    }

    fn page(categories: Option<Vec<&str>>) -> WikiPage {
        WikiPage {
            title: "Sony".to_string(),
            extract: Some("Sony Group Corporation is a Japanese conglomerate.".to_string()),
            categories: categories
                .map(|list| list.into_iter().map(|t| CategoryRef { title: t.to_string() }).collect()),
            full_url: Some("https://en.wikipedia.org/wiki/Sony".to_string()),
            thumbnail: None,
        }
    }

    #[test]
    fn truncates_at_first_section_break() {
        let text = "The lead summary sentence.\n\n== History ==\nLater sections.";
        assert_eq!(truncate_at_section_break(text), "The lead summary sentence.\n\n");
    }

    #[test]
    fn leaves_text_without_section_break_untouched() {
        let text = "Just the lead, nothing else.";
        assert_eq!(truncate_at_section_break(text), text);
    }

    #[test]
    fn stop_category_match_is_case_insensitive() {
        let resolver = resolver_with(
            &["category:all disambiguation pages"],
            &[],
            MissingCategoryPolicy::Allow,
        );
        let rejected = page(Some(vec!["Category:All Disambiguation Pages"]));
        assert!(!resolver.passes_category_filter(&rejected));

        let accepted = page(Some(vec!["Category:Japanese brands"]));
        assert!(resolver.passes_category_filter(&accepted));
    }

    #[test]
    fn missing_categories_follow_configured_policy() {
        let permissive = resolver_with(&["category:x"], &[], MissingCategoryPolicy::Allow);
        assert!(permissive.passes_category_filter(&page(None)));

        let strict = resolver_with(&["category:x"], &[], MissingCategoryPolicy::Reject);
        assert!(!strict.passes_category_filter(&page(None)));
    }

    #[test]
    fn stop_phrases_match_anywhere_in_the_extract() {
        let resolver = resolver_with(&[], &["may refer to:"], MissingCategoryPolicy::Allow);
        assert!(resolver.contains_stop_phrase("Sony May Refer To: several entities"));
        assert!(!resolver.contains_stop_phrase("Sony Group Corporation is a conglomerate."));
    }
}
