use crate::types::{FeedEntry, ImageSet, Post, Result};
use async_trait::async_trait;

/// Trait for pulling the raw entries of the watched feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable name for this source
    fn source_name(&self) -> String;

    /// Fetch the current entries in source order.
    /// Transport and parse problems are logged and produce an empty list.
    async fn pull(&self) -> Vec<FeedEntry>;
}

/// Trait for fetching the structured per-post document behind a permalink
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_document(&self, link: &str) -> Result<String>;
}

/// One step of the image fallback chain.
#[async_trait]
pub trait ImageStrategy: Send + Sync {
    fn strategy_name(&self) -> &'static str;

    /// `None` or an empty list hands the post to the next strategy.
    async fn resolve(&self, post: &Post) -> Option<ImageSet>;
}

/// The messaging endpoint notifications are delivered to
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<()>;

    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<()>;

    /// `caption` belongs to the first item only.
    async fn send_album(&self, photo_urls: &[String], caption: &str) -> Result<()>;
}

/// Durable backing of the seen-set. Load and persist are the only I/O it does.
pub trait SeenBackend: Send + Sync {
    fn describe(&self) -> String;

    /// `Ok(None)` means no state has been written yet.
    fn load(&self) -> Result<Option<Vec<String>>>;

    fn persist(&self, post_ids: &[String]) -> Result<()>;
}
