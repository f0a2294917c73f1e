//! Join of headlines with wiki candidates, scoring, and row-level dedup.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use unicode_normalization::UnicodeNormalization;

use crate::news::Headline;
use crate::scoring::{self, Scorer};
use crate::wiki::WikiMatch;

/// Denormalized (headline, wiki candidate) pair with the batch date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRow {
    pub wiki_id: i64,
    pub news_id: i64,
    pub entity: String,
    pub title: String,
    pub wiki: String,
    pub wiki_url: String,
    pub wiki_image: String,
    pub headline: String,
    pub news: String,
    pub news_image: String,
    pub news_url: String,
    pub date: String,
}

/// A joined row with its similarity score and relevance flag. Transient;
/// rebuilt from scratch each batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRow {
    #[serde(flatten)]
    pub row: JoinedRow,
    pub sm_score: f64,
    pub predict: bool,
}

/// Inner join on news_id. `wiki_id` is assigned by enumeration order over
/// the wiki table before the join, so downstream consumers can address
/// individual wiki rows.
pub fn join(headlines: &[Headline], matches: &[WikiMatch], batch_date: &str) -> Vec<JoinedRow> {
    let by_id: HashMap<i64, &Headline> = headlines.iter().map(|h| (h.news_id, h)).collect();

    matches
        .iter()
        .enumerate()
        .filter_map(|(i, m)| {
            by_id.get(&m.news_id).map(|headline| JoinedRow {
                wiki_id: i as i64,
                news_id: m.news_id,
                entity: m.entity.clone(),
                title: m.title.clone(),
                wiki: m.wiki.clone(),
                wiki_url: m.wiki_url.clone(),
                wiki_image: m.wiki_image.clone(),
                headline: headline.headline.clone(),
                news: headline.news.clone(),
                news_image: headline.news_image.clone(),
                news_url: headline.news_url.clone(),
                date: batch_date.to_string(),
            })
        })
        .collect()
}

/// Score every row's (headline text, extract) pair and attach the
/// relevance flag.
pub fn score_rows(rows: Vec<JoinedRow>, scorer: &Scorer) -> Vec<ScoredRow> {
    rows.into_iter()
        .map(|row| {
            let sm_score = scoring::score(&row.news, &row.wiki);
            ScoredRow {
                predict: scorer.predict(sm_score),
                sm_score,
                row,
            }
        })
        .collect()
}

/// Row-level dedup over scored rows; the result is the persisted set.
///
/// Titles are rewritten to NFD form first so distinct encodings of the same
/// title collapse to one key. Rows duplicating (news_id, entity, title) are
/// dropped, then among predicted-relevant rows duplicates of
/// (news_id, title) are dropped keeping the first occurrence: one entity
/// appearing under different raw spellings that resolve to the same article
/// yields one row.
pub fn dedup(rows: Vec<ScoredRow>) -> Vec<ScoredRow> {
    let mut seen_entity_title = HashSet::new();
    let mut unique = Vec::new();
    for mut scored in rows {
        let normalized: String = scored.row.title.as_str().nfd().collect();
        scored.row.title = normalized;

        let key = (
            scored.row.news_id,
            scored.row.entity.clone(),
            scored.row.title.clone(),
        );
        if seen_entity_title.insert(key) {
            unique.push(scored);
        }
    }

    let mut seen_title = HashSet::new();
    unique
        .into_iter()
        .filter(|s| s.predict)
        .filter(|s| seen_title.insert((s.row.news_id, s.row.title.clone())))
        .collect()
}
