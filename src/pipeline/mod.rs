//! Batch orchestration: Extract → Resolve → Score → Join/Dedup →
//! persistence hand-off. A strict linear stage sequence; the terminal state
//! is "batch persisted" or "batch aborted with partial results logged".

pub mod join;
pub mod render;

use std::collections::HashSet;
use tracing::info;

use crate::config::AppConfig;
use crate::db::{Database, NewsRecord, WikiRecord};
use crate::entity::EntityExtractor;
use crate::error::Result;
use crate::news::{self, NewsClient};
use crate::scoring::Scorer;
use crate::wiki::{self, WikiClient, WikiResolver};
use crate::TARGET_PIPELINE;

pub use join::{JoinedRow, ScoredRow};

#[derive(Debug, Clone, Copy)]
pub struct BatchSummary {
    pub headlines: usize,
    pub candidates: usize,
    pub relevant: usize,
}

/// The batch date attached to every joined row, e.g. "Jun-09-2021".
pub fn batch_date() -> String {
    chrono::Local::now().format("%b-%d-%Y").to_string()
}

/// Run one full batch and persist the filtered result.
pub async fn run_batch(config: &AppConfig, db: &Database) -> Result<BatchSummary> {
    let news_client = NewsClient::new(&config.news, &config.http)?;
    let headlines = news::load_news(&news_client, &config.news.source_words).await?;

    let extractor = EntityExtractor::new(&config.entities);
    let wiki_client = WikiClient::new(&config.wiki, &config.http)?;
    let resolver = WikiResolver::new(wiki_client, &config.wiki);
    let matches = wiki::load_wiki(&headlines, &extractor, &resolver).await;

    let scorer = Scorer::new(&config.filter);
    let joined = join::join(&headlines, &matches, &batch_date());
    let filtered = filter_rows(joined, &scorer);

    let summary = BatchSummary {
        headlines: headlines.len(),
        candidates: matches.len(),
        relevant: filtered.len(),
    };

    persist(db, &filtered).await?;

    info!(
        target: TARGET_PIPELINE,
        "batch persisted: {} headlines, {} candidates, {} relevant matches",
        summary.headlines, summary.candidates, summary.relevant
    );
    Ok(summary)
}

/// Score joined rows and apply the dedup policy; the result is the
/// persisted set.
pub fn filter_rows(rows: Vec<JoinedRow>, scorer: &Scorer) -> Vec<ScoredRow> {
    let scored = join::score_rows(rows, scorer);

    if !scored.is_empty() {
        let mean = scored.iter().map(|s| s.sm_score).sum::<f64>() / scored.len() as f64;
        info!(target: TARGET_PIPELINE, "mean similarity score: {:.4}", mean);
    }

    join::dedup(scored)
}

/// Hand the filtered rows to the persistence layer.
pub async fn persist(db: &Database, rows: &[ScoredRow]) -> Result<()> {
    let (news_records, wiki_records) = build_records(rows);
    db.replace_batch(&news_records, &wiki_records).await
}

/// Split the filtered join back into the two persisted tables.
///
/// Wiki rows are deduplicated on (date, news_id, title); news rows on
/// (date, news_id), with the display column rendered from every entity
/// matched for that headline.
pub fn build_records(rows: &[ScoredRow]) -> (Vec<NewsRecord>, Vec<WikiRecord>) {
    let mut wiki_seen = HashSet::new();
    let mut wiki_records = Vec::new();
    for scored in rows {
        let row = &scored.row;
        if wiki_seen.insert((row.date.clone(), row.news_id, row.title.clone())) {
            wiki_records.push(WikiRecord {
                date: row.date.clone(),
                news_id: row.news_id,
                entity: row.entity.clone(),
                title: row.title.clone(),
                wiki: row.wiki.clone(),
                wiki_url: row.wiki_url.clone(),
                wiki_image: row.wiki_image.clone(),
            });
        }
    }

    let mut news_seen = HashSet::new();
    let mut news_records = Vec::new();
    for scored in rows {
        let row = &scored.row;
        if !news_seen.insert((row.date.clone(), row.news_id)) {
            continue;
        }

        let mut entity_seen = HashSet::new();
        let mut entities = Vec::new();
        for other in rows {
            if other.row.news_id == row.news_id && entity_seen.insert(other.row.entity.clone()) {
                entities.push(other.row.entity.clone());
            }
        }

        news_records.push(NewsRecord {
            date: row.date.clone(),
            news_id: row.news_id,
            headline: row.headline.clone(),
            news: row.news.clone(),
            news_dis: render::render_text(&row.news, &entities),
            news_image: row.news_image.clone(),
            news_url: row.news_url.clone(),
        });
    }

    (news_records, wiki_records)
}
