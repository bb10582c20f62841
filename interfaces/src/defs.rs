use std::collections::BTreeSet;

/// One item as the syndication feed presents it, before any normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub link: String,
    pub author: String,
    pub title: String,
    /// HTML fragment carried in the entry's summary or content element.
    pub summary: String,
}

/// A feed entry with its stable identity and normalized author attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_id: String,
    pub author: String,
    pub title: String,
    pub link: String,
    pub summary: String,
}

impl Post {
    pub fn title_lower(&self) -> String {
        self.title.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDecision {
    pub author_match: bool,
    pub keyword_match: bool,
    pub matched_keywords: BTreeSet<String>,
    pub label: String,
}

impl MatchDecision {
    pub fn is_eligible(&self) -> bool {
        self.author_match || self.keyword_match
    }
}

/// How a notification ended up being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchKind {
    Text,
    Photo,
    Album,
}

impl DispatchKind {
    pub fn for_image_count(count: usize) -> Self {
        match count {
            0 => DispatchKind::Text,
            1 => DispatchKind::Photo,
            _ => DispatchKind::Album,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchRest {
    pub wait_at_least_ms: u64,
}

// Object style note:
// Everything here is plain data shared between the pipeline stages. Behaviour
// (fetching, classification, dispatch) lives in the watcher crate behind traits,
// so these types stay free of I/O and can be built by hand in tests.
