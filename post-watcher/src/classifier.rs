use crate::types::{FilterConfig, MatchDecision};
use std::collections::BTreeSet;

const LABEL_BOTH: &str = "tracked user + keyword match";
const LABEL_AUTHOR: &str = "tracked user";

/// Decides whether a post is worth a notification and why.
#[derive(Debug, Clone)]
pub struct Classifier {
    filter: FilterConfig,
}

impl Classifier {
    pub fn new(filter: FilterConfig) -> Self {
        Self { filter }
    }

    /// `author` must already be normalized and `title_lower` lower-cased.
    pub fn classify(&self, author: &str, title_lower: &str) -> MatchDecision {
        let author_match = !author.is_empty() && self.filter.tracked_authors.contains(author);

        let matched_keywords: BTreeSet<String> = if self.filter.keyword_filter_enabled {
            self.filter
                .keywords
                .iter()
                .filter(|keyword| title_lower.contains(keyword.as_str()))
                .cloned()
                .collect()
        } else {
            BTreeSet::new()
        };
        let keyword_match = !matched_keywords.is_empty();

        let label = build_label(author_match, keyword_match, &matched_keywords);

        MatchDecision {
            author_match,
            keyword_match,
            matched_keywords,
            label,
        }
    }
}

/// Human-readable reason shown in the notification header.
pub fn build_label(author_match: bool, keyword_match: bool, matched: &BTreeSet<String>) -> String {
    match (author_match, keyword_match) {
        (true, true) => LABEL_BOTH.to_string(),
        (true, false) => LABEL_AUTHOR.to_string(),
        _ => {
            let joined = matched.iter().map(String::as_str).collect::<Vec<_>>().join(",");
            if joined.is_empty() {
                "keyword match: unknown".to_string()
            } else {
                format!("keyword match: {}", joined)
            }
        }
    }
}
