use std::collections::{BTreeSet, HashSet};
use std::time::Duration;
// Use the interfaces crate for the shared data model
pub use interfaces::defs::{DispatchKind, FeedEntry, MatchDecision, Post, WatchRest};

/// Upper bound on images attached to a single notification (album size limit).
pub const MAX_IMAGES: usize = 10;

/// Ordered image URLs resolved for one post, at most [`MAX_IMAGES`] long.
pub type ImageSet = Vec<String>;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub feed_timeout_seconds: u64,
    pub document_timeout_seconds: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "post-watcher/0.1 (community feed notifier)".to_string(),
            feed_timeout_seconds: 20,
            document_timeout_seconds: 10,
            max_redirects: 5,
        }
    }
}

impl FetchConfig {
    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_seconds)
    }

    /// The per-post lookup must never outlast the feed fetch.
    pub fn document_timeout(&self) -> Duration {
        let seconds = self
            .document_timeout_seconds
            .min(self.feed_timeout_seconds.saturating_sub(1))
            .max(1);
        Duration::from_secs(seconds)
    }
}

/// Who and what to watch for. All values are already trimmed and lower-cased.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub tracked_authors: HashSet<String>,
    pub keywords: BTreeSet<String>,
    pub keyword_filter_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub interval: Duration,
    pub error_pause: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
            error_pause: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Dispatch rejected by {method}: {description}")]
    Dispatch { method: String, description: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WatchError>;
