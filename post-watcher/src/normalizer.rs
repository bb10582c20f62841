//! Stable identities for posts and authors.

use crate::types::{FeedEntry, Post};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_POST_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/comments/([A-Za-z0-9]+)(?:[/?#]|$)").expect("valid post token pattern")
});
static RE_USER_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^A-Za-z0-9_])u/([A-Za-z0-9_-]+)").expect("valid user token pattern")
});

/// Extract the canonical post token from a permalink.
///
/// `https://www.reddit.com/r/test/comments/abc123/title/` yields `abc123`.
/// Links without a `/comments/<token>` segment are returned trimmed, so the
/// function is total and idempotent.
pub fn post_id(link: &str) -> String {
    let link = link.trim();
    if link.is_empty() {
        return String::new();
    }

    match RE_POST_TOKEN.captures(link) {
        Some(caps) => caps[1].to_string(),
        None => link.to_string(),
    }
}

/// Normalize a feed author field to a bare lower-case user name.
///
/// `/u/ParentalAdvice` becomes `parentaladvice`, and free text such as
/// `Username (u/Vast_Requirement8134)` becomes `vast_requirement8134`.
pub fn normalize_author(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if let Some(caps) = RE_USER_TOKEN.captures(raw) {
        return caps[1].to_lowercase();
    }

    let lowered = raw.to_lowercase();
    let stripped = lowered
        .strip_prefix("/u/")
        .or_else(|| lowered.strip_prefix("u/"))
        .unwrap_or(&lowered);
    stripped.trim().to_string()
}

/// Split a comma separated setting into trimmed, lower-cased, unique values.
pub fn normalize_list(raw: &str) -> Vec<String> {
    let mut values: Vec<String> = raw
        .split(',')
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}

/// Attach identity and normalized author to a raw feed entry.
pub fn normalize_entry(entry: FeedEntry) -> Post {
    Post {
        post_id: post_id(&entry.link),
        author: normalize_author(&entry.author),
        title: entry.title,
        link: entry.link.trim().to_string(),
        summary: entry.summary,
    }
}
