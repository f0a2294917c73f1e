//! Named-entity extraction from headline text.
//!
//! A pattern-based recognizer over capitalized spans: structural signals
//! (capitalization, punctuation, organization suffixes, person titles) plus
//! small fixed lexicons for the cases structure cannot separate. Fully
//! deterministic: identical input text always yields the identical ordered
//! entity list.

use std::collections::HashSet;
use tracing::debug;

use super::types::{EntityLabel, ORGANIZATION_MARKER};
use super::TARGET_ENTITY;
use crate::config::EntityConfig;

// High-precision organization suffixes (lowercase, checked per token)
const ORG_SUFFIXES: &[&str] = &[
    "inc",
    "corp",
    "co",
    "ltd",
    "llc",
    "plc",
    "group",
    "bank",
    "corporation",
    "company",
    "university",
    "college",
    "institute",
    "foundation",
    "agency",
    "department",
    "bureau",
    "commission",
    "committee",
    "administration",
    "association",
    "airlines",
    "motors",
    "times",
    "post",
    "journal",
];

// Keywords marking a named place of assembly or infrastructure
const FACILITY_KEYWORDS: &[&str] = &[
    "airport", "stadium", "arena", "bridge", "tower", "hospital", "museum", "plaza", "hotel",
    "casino", "library", "station", "terminal", "dam", "tunnel", "hall", "palace", "cathedral",
    "temple", "speedway",
];

// Organizations that carry no structural marker in text
const KNOWN_ORGS: &[&str] = &[
    "google",
    "apple",
    "microsoft",
    "amazon",
    "facebook",
    "meta",
    "tesla",
    "twitter",
    "ibm",
    "intel",
    "nvidia",
    "oracle",
    "samsung",
    "sony",
    "toyota",
    "honda",
    "netflix",
    "spotify",
    "uber",
    "airbnb",
    "paypal",
    "visa",
    "mastercard",
    "boeing",
    "airbus",
    "pfizer",
    "moderna",
    "biogen",
    "gm",
    "gmc",
    "ford",
    "walmart",
    "target",
    "costco",
    "starbucks",
    "disney",
    "congress",
    "senate",
    "pentagon",
    "reuters",
    "bloomberg",
    "nasdaq",
    "opec",
];

// Nationalities plus religious and political groupings
const KNOWN_GROUPS: &[&str] = &[
    "democrats",
    "republicans",
    "conservatives",
    "liberals",
    "progressives",
    "americans",
    "american",
    "british",
    "english",
    "french",
    "german",
    "germans",
    "russian",
    "russians",
    "ukrainian",
    "ukrainians",
    "chinese",
    "japanese",
    "korean",
    "koreans",
    "israeli",
    "israelis",
    "palestinian",
    "palestinians",
    "european",
    "europeans",
    "mexican",
    "mexicans",
    "canadian",
    "canadians",
    "indian",
    "indians",
    "christians",
    "muslims",
    "jews",
    "catholics",
    "taliban",
    "kurds",
];

// Known place names; the label universe has no location label, so spans
// classified as locations are dropped rather than mislabeled
const KNOWN_LOCATIONS: &[&str] = &[
    "america", "europe", "asia", "africa", "australia", "china", "india", "japan", "germany",
    "france", "italy", "spain", "brazil", "mexico", "russia", "ukraine", "israel", "canada",
    "england", "london", "paris", "tokyo", "berlin", "moscow", "beijing", "washington",
    "california", "texas", "florida", "chicago", "boston",
];

// Words that commonly start sentences capitalized without naming anything;
// skipped only when they would head a span
const SENTENCE_STARTERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "it", "he", "she", "we", "they", "i",
    "you", "in", "on", "at", "to", "for", "from", "by", "with", "and", "but", "or", "so", "yet",
    "if", "because", "as", "after", "before", "when", "while", "what", "where", "who", "why",
    "how", "is", "are", "was", "were", "be", "have", "has", "had", "will", "would", "can",
    "could", "should", "there", "here", "its", "his", "her", "their", "our", "not", "no",
    "more", "most", "some", "two", "three", "today", "yesterday", "tomorrow", "now", "then",
    "man", "woman", "police", "report", "watch", "live", "breaking", "opinion", "exclusive",
    "meet", "inside",
];

/// Extracts named entities worth resolving against Wikipedia.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    wanted: HashSet<EntityLabel>,
}

impl EntityExtractor {
    pub fn new(config: &EntityConfig) -> Self {
        Self {
            wanted: config.wanted_labels.iter().copied().collect(),
        }
    }

    /// Entities in first-seen order, deduplicated by exact string match.
    /// Organization entities carry the disambiguating marker suffix.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut entities = Vec::new();

        for (span_text, label) in scan_spans(text) {
            let Some(label) = label else {
                continue;
            };
            if !self.wanted.contains(&label) {
                continue;
            }

            let mut name = span_text;
            if label == EntityLabel::Organization {
                name.push_str(ORGANIZATION_MARKER);
            }
            if seen.insert(name.clone()) {
                debug!(target: TARGET_ENTITY, "extracted {} as {}", name, label);
                entities.push(name);
            }
        }

        entities
    }
}

/// Walk the text for spans of consecutive capitalized words, allowing "of"
/// and "the" as connectors, and classify each span. Returns spans in text
/// order.
fn scan_spans(text: &str) -> Vec<(String, Option<EntityLabel>)> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut spans = Vec::new();

    let mut i = 0;
    while i < words.len() {
        let head = clean_token(words[i]);
        if head.is_empty() || !starts_uppercase(&head) {
            i += 1;
            continue;
        }
        if SENTENCE_STARTERS.contains(&head.to_lowercase().as_str()) {
            i += 1;
            continue;
        }

        let mut span = vec![strip_possessive(&head).to_string()];
        let mut ended = ends_sentence(words[i]);
        i += 1;

        while !ended && i < words.len() {
            let raw = words[i];
            let token = clean_token(raw);
            if token.is_empty() {
                break;
            }

            if starts_uppercase(&token) {
                span.push(strip_possessive(&token).to_string());
                ended = ends_sentence(raw);
                i += 1;
            } else if matches!(token.to_lowercase().as_str(), "of" | "the") {
                // Connectors only continue a span when another capitalized
                // word follows ("Bank of America").
                let next_is_cap = words
                    .get(i + 1)
                    .map(|w| {
                        let c = clean_token(w);
                        !c.is_empty() && starts_uppercase(&c)
                    })
                    .unwrap_or(false);
                if !next_is_cap {
                    break;
                }
                span.push(token.to_string());
                i += 1;
            } else {
                break;
            }
        }

        spans.push((span.join(" "), classify(&span)));
    }

    spans
}

/// Map a capitalized span to a label, or None for spans the universe has no
/// label for (locations, connector-only leftovers).
fn classify(span: &[String]) -> Option<EntityLabel> {
    let lowered: Vec<String> = span.iter().map(|t| t.to_lowercase()).collect();
    let joined = lowered.join(" ");

    if lowered.iter().any(|t| ORG_SUFFIXES.contains(&t.as_str()))
        || KNOWN_ORGS.contains(&joined.as_str())
    {
        return Some(EntityLabel::Organization);
    }
    if span.iter().any(|t| has_letter_and_digit(t)) {
        return Some(EntityLabel::Product);
    }
    if span.len() == 1 && is_acronym(&span[0]) {
        return Some(EntityLabel::Organization);
    }
    if lowered.iter().any(|t| FACILITY_KEYWORDS.contains(&t.as_str())) {
        return Some(EntityLabel::Facility);
    }
    if KNOWN_LOCATIONS.contains(&joined.as_str()) {
        return None;
    }
    if span.len() == 1 && KNOWN_GROUPS.contains(&joined.as_str()) {
        return Some(EntityLabel::Group);
    }
    Some(EntityLabel::Person)
}

/// Trim non-alphanumeric characters from both ends, keeping inner
/// punctuation (hyphens, periods in abbreviations).
fn clean_token(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric()).to_string()
}

fn strip_possessive(token: &str) -> &str {
    token
        .strip_suffix("'s")
        .or_else(|| token.strip_suffix("\u{2019}s"))
        .unwrap_or(token)
}

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

/// Sentence-ending punctuation on the raw word terminates a span after the
/// word is included.
fn ends_sentence(raw: &str) -> bool {
    raw.ends_with(['.', '!', '?', ':', ';', ',', ')', '"', '\u{201d}'])
}

fn has_letter_and_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_alphabetic()) && token.chars().any(|c| c.is_numeric())
}

fn is_acronym(token: &str) -> bool {
    (2..=6).contains(&token.len()) && token.chars().all(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor_with_all_labels() -> EntityExtractor {
        EntityExtractor::new(&EntityConfig {
            wanted_labels: vec![
                EntityLabel::Person,
                EntityLabel::Organization,
                EntityLabel::Facility,
                EntityLabel::Group,
                EntityLabel::Product,
            ],
        })
    }

    const SONY_HEADLINE: &str = "Sony announces WF-1000XM4 noise-canceling earbuds \
        with LDAC and IPX4 water resistance";

    #[test]
    fn extracts_organizations_with_marker() {
        let extractor = extractor_with_all_labels();
        let entities = extractor.extract(SONY_HEADLINE);
        assert!(entities.contains(&"Sony (organization)".to_string()));
        assert!(entities.contains(&"LDAC (organization)".to_string()));
    }

    #[test]
    fn extracts_model_numbers_as_products_without_marker() {
        let extractor = extractor_with_all_labels();
        let entities = extractor.extract(SONY_HEADLINE);
        assert!(entities.contains(&"WF-1000XM4".to_string()));
        assert!(entities.contains(&"IPX4".to_string()));
    }

    #[test]
    fn entities_come_out_in_first_seen_order() {
        let extractor = extractor_with_all_labels();
        let entities = extractor.extract(SONY_HEADLINE);
        let sony = entities
            .iter()
            .position(|e| e == "Sony (organization)")
            .unwrap();
        let earbuds = entities.iter().position(|e| e == "WF-1000XM4").unwrap();
        assert!(sony < earbuds);
    }

    #[test]
    fn repeated_mentions_and_possessives_collapse_to_one_entity() {
        let extractor = extractor_with_all_labels();
        let entities =
            extractor.extract("Sony revealed earbuds. Sony\u{2019}s lineup grows, Sony said.");
        let sony_count = entities
            .iter()
            .filter(|e| *e == "Sony (organization)")
            .count();
        assert_eq!(sony_count, 1);
    }

    #[test]
    fn extraction_is_deterministic() {
        let extractor = extractor_with_all_labels();
        let first = extractor.extract(SONY_HEADLINE);
        let second = extractor.extract(SONY_HEADLINE);
        assert_eq!(first, second);
    }

    #[test]
    fn classifies_people_and_groups() {
        let extractor = extractor_with_all_labels();
        let entities =
            extractor.extract("Pelosi urges Democrats to continue voting rights push, despite Manchin");
        assert!(entities.contains(&"Pelosi".to_string()));
        assert!(entities.contains(&"Democrats".to_string()));
        assert!(entities.contains(&"Manchin".to_string()));
    }

    #[test]
    fn org_suffix_wins_over_person_default() {
        let extractor = extractor_with_all_labels();
        let entities = extractor.extract("The Justice Department defended the filing");
        assert!(entities.contains(&"Justice Department (organization)".to_string()));
    }

    #[test]
    fn unwanted_labels_are_filtered_out() {
        let persons_only = EntityExtractor::new(&EntityConfig {
            wanted_labels: vec![EntityLabel::Person],
        });
        let entities = persons_only.extract(SONY_HEADLINE);
        assert!(entities.iter().all(|e| !e.ends_with("(organization)")));
        assert!(!entities.contains(&"WF-1000XM4".to_string()));
    }

    #[test]
    fn text_without_entities_yields_empty_set() {
        let extractor = extractor_with_all_labels();
        assert!(extractor.extract("the quick brown fox jumps over a lazy dog").is_empty());
        assert!(extractor.extract("").is_empty());
    }

    #[test]
    fn known_locations_are_dropped_not_mislabeled() {
        let extractor = extractor_with_all_labels();
        let entities = extractor.extract("Protests continued across France on Friday");
        assert!(!entities.iter().any(|e| e.contains("France")));
    }
}
