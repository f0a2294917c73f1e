//! Textual similarity between headline text and Wikipedia extracts.
//!
//! Both texts are lowercased, tokenized on word boundaries, stripped of
//! English stopwords, and turned into term-frequency vectors; the score is
//! the cosine of the angle between those vectors. Empty vectors score 0.0,
//! so the function never divides by zero.

pub mod stopwords;

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::config::FilterConfig;

use stopwords::is_stopword;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").unwrap();
}

/// Classifies (headline, extract) pairs as relevant or not.
#[derive(Debug, Clone)]
pub struct Scorer {
    threshold: f64,
}

impl Scorer {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            threshold: config.threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Strictly greater than: a score exactly at the threshold is not
    /// relevant.
    pub fn predict(&self, score: f64) -> bool {
        score > self.threshold
    }
}

/// Cosine similarity over stopword-stripped term-frequency vectors,
/// always in [0, 1].
pub fn score(a: &str, b: &str) -> f64 {
    let va = term_frequencies(a);
    let vb = term_frequencies(b);

    let numerator: f64 = va
        .iter()
        .filter_map(|(term, fa)| vb.get(term).map(|fb| fa * fb))
        .sum();

    let norm_a = va.values().map(|f| f * f).sum::<f64>().sqrt();
    let norm_b = vb.values().map(|f| f * f).sum::<f64>().sqrt();
    let denominator = norm_a * norm_b;

    if denominator == 0.0 {
        return 0.0;
    }

    // Rounding can push identical vectors a hair past 1.0.
    (numerator / denominator).min(1.0)
}

fn term_frequencies(text: &str) -> HashMap<String, f64> {
    let lowered = text.to_lowercase();
    let mut frequencies = HashMap::new();
    for token in WORD.find_iter(&lowered) {
        let token = token.as_str();
        if is_stopword(token) {
            continue;
        }
        *frequencies.entry(token.to_string()).or_insert(0.0) += 1.0;
    }
    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_similarity_is_maximal() {
        let text = "Sony announces noise-canceling earbuds with longer battery life";
        assert!((score(text, text) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn score_is_symmetric() {
        let a = "GMC unveiled its Hummer EV SUV with 830 horsepower";
        let b = "The GMC Hummer EV is an off-road luxury electric vehicle";
        assert_eq!(score(a, b), score(b, a));
    }

    #[test]
    fn disjoint_vocabularies_score_zero() {
        assert_eq!(score("quarterly earnings report", "volcanic eruption iceland"), 0.0);
    }

    #[test]
    fn stopword_only_text_scores_zero() {
        // Every token is a stopword, leaving an empty vector on one side.
        assert_eq!(score("the and of to", "the and of to"), 0.0);
        assert_eq!(score("", "anything at all here"), 0.0);
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let pairs = [
            ("Biogen faces tough questions", "Biogen is a biotechnology company"),
            ("Man Slaps Macron During Visit", "Emmanuel Macron is a French politician"),
            ("a b c", "a b c a b c"),
        ];
        for (a, b) in pairs {
            let s = score(a, b);
            assert!((0.0..=1.0).contains(&s), "score {} out of range", s);
        }
    }

    #[test]
    fn partial_overlap_scores_strictly_between_zero_and_one() {
        // After stopword stripping the two texts share exactly
        // {"hummer", "ev"}.
        let a = "the hummer ev is arriving soon";
        let b = "a hummer and an ev were spotted downtown";
        let first = score(a, b);
        assert!(first > 0.0 && first < 1.0, "score {} not in (0, 1)", first);
        // Deterministic for fixed inputs.
        assert_eq!(first, score(a, b));
    }

    #[test]
    fn repeated_terms_weigh_into_the_score() {
        let balanced = score("hummer arrives", "hummer leaves");
        let skewed = score("hummer hummer arrives", "hummer leaves");
        assert!(balanced > 0.0 && skewed > 0.0);
        assert_ne!(balanced, skewed);
    }

    #[test]
    fn predict_is_strictly_greater_than_threshold() {
        let scorer = Scorer::new(&FilterConfig { threshold: 0.2 });
        assert!(!scorer.predict(0.2));
        assert!(scorer.predict(0.2000001));
        assert!(!scorer.predict(0.0));
    }
}
