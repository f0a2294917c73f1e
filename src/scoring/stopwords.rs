//! Fixed English stopword list applied before similarity scoring.
//!
//! The list mirrors the common English stopword set. Contracted forms are
//! listed as the fragments the `\w+` tokenizer actually produces ("don't"
//! tokenizes to "don" and "t").

use lazy_static::lazy_static;
use std::collections::HashSet;

pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "couldn", "d", "did", "didn", "do", "does", "doesn", "doing",
    "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has",
    "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "m",
    "ma", "me", "mightn", "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "re", "s", "same", "shan", "she", "should", "shouldn", "so", "some",
    "such", "t", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve",
    "very", "was", "wasn", "we", "were", "weren", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "won", "wouldn", "y", "you", "your", "yours",
    "yourself", "yourselves",
];

lazy_static! {
    static ref STOPWORD_SET: HashSet<&'static str> = STOPWORDS.iter().copied().collect();
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_function_words_are_stopwords() {
        for word in ["the", "and", "of", "to", "is"] {
            assert!(is_stopword(word), "{} should be a stopword", word);
        }
    }

    #[test]
    fn content_words_are_not_stopwords() {
        for word in ["hummer", "ev", "sony", "earbuds"] {
            assert!(!is_stopword(word), "{} should not be a stopword", word);
        }
    }

    #[test]
    fn matching_is_case_sensitive_on_lowered_input() {
        // Callers lowercase before lookup; the table itself is lowercase.
        assert!(!is_stopword("The"));
    }
}
