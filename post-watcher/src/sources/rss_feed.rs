use crate::traits::FeedSource;
use crate::types::FeedEntry;
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// The watched community feed, fetched over HTTP and parsed as RSS/Atom
pub struct RssFeedSource {
    pub url: String,
    fetcher: Arc<Fetcher>,
}

impl RssFeedSource {
    pub fn new(url: String, fetcher: Arc<Fetcher>) -> Self {
        Self { url, fetcher }
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    fn source_name(&self) -> String {
        // Extract domain name from URL for log lines
        if let Ok(parsed) = url::Url::parse(&self.url) {
            if let Some(domain) = parsed.domain() {
                return format!("RSS Feed ({})", domain);
            }
        }
        "RSS Feed".to_string()
    }

    async fn pull(&self) -> Vec<FeedEntry> {
        info!("Pulling RSS feed: {}", self.url);

        let content = match self.fetcher.fetch_feed(&self.url).await {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to fetch RSS feed {}: {}", self.url, e);
                return Vec::new();
            }
        };

        let entries = FeedParser::parse_entries(&content);
        info!("Fetched feed with {} entries from {}", entries.len(), self.source_name());
        entries
    }
}
