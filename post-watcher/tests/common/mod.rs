#![allow(dead_code)]

use async_trait::async_trait;
use post_watcher::traits::{DocumentSource, FeedSource, Messenger};
use post_watcher::types::{FeedEntry, Result, WatchError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn entry(link: &str, author: &str, title: &str, summary: &str) -> FeedEntry {
    FeedEntry {
        link: link.to_string(),
        author: author.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
    }
}

pub struct FakeFeed {
    pub entries: Vec<FeedEntry>,
}

#[async_trait]
impl FeedSource for FakeFeed {
    fn source_name(&self) -> String {
        "fake feed".to_string()
    }

    async fn pull(&self) -> Vec<FeedEntry> {
        self.entries.clone()
    }
}

/// Serves canned documents by permalink and records every lookup.
/// Links without a canned body fail like an unreachable host.
#[derive(Default)]
pub struct FakeDocuments {
    pub bodies: HashMap<String, String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FakeDocuments {
    pub fn with(mut self, link: &str, body: String) -> Self {
        self.bodies.insert(link.to_string(), body);
        self
    }
}

#[async_trait]
impl DocumentSource for FakeDocuments {
    async fn fetch_document(&self, link: &str) -> Result<String> {
        self.calls.lock().unwrap().push(link.to_string());
        self.bodies
            .get(link)
            .cloned()
            .ok_or_else(|| WatchError::HttpStatus {
                status: 503,
                url: link.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Photo(String, String),
    Album(Vec<String>, String),
}

#[derive(Default, Clone)]
pub struct RecordingMessenger {
    pub sent: Arc<Mutex<Vec<Sent>>>,
    pub failing: Arc<AtomicBool>,
    /// Reject photos and albums only, the way the endpoint refuses an image
    /// URL it cannot fetch.
    pub rejecting_media: Arc<AtomicBool>,
}

impl RecordingMessenger {
    fn record(&self, method: &str, sent: Sent) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(WatchError::Dispatch {
                method: method.to_string(),
                description: "Bad Request: chat not found".to_string(),
            });
        }
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }

    fn reject_media(&self, method: &str) -> Result<()> {
        if self.rejecting_media.load(Ordering::SeqCst) {
            return Err(WatchError::Dispatch {
                method: method.to_string(),
                description: "Bad Request: wrong file identifier/HTTP URL specified".to_string(),
            });
        }
        Ok(())
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.record("sendMessage", Sent::Text(text.to_string()))
    }

    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<()> {
        self.reject_media("sendPhoto")?;
        self.record("sendPhoto", Sent::Photo(photo_url.to_string(), caption.to_string()))
    }

    async fn send_album(&self, photo_urls: &[String], caption: &str) -> Result<()> {
        self.reject_media("sendMediaGroup")?;
        self.record("sendMediaGroup", Sent::Album(photo_urls.to_vec(), caption.to_string()))
    }
}

/// Wrap a post object the way the listing endpoint does.
pub fn post_document(post: serde_json::Value) -> String {
    serde_json::json!([
        { "kind": "Listing", "data": { "children": [ { "kind": "t3", "data": post } ] } },
        { "kind": "Listing", "data": { "children": [] } }
    ])
    .to_string()
}

/// A gallery post whose items reference `media_ids` in the given order.
pub fn gallery_document(media_ids: &[&str]) -> String {
    let items: Vec<serde_json::Value> = media_ids
        .iter()
        .map(|id| serde_json::json!({ "media_id": id, "id": 1 }))
        .collect();
    let metadata: serde_json::Map<String, serde_json::Value> = media_ids
        .iter()
        .map(|id| {
            (
                id.to_string(),
                serde_json::json!({
                    "status": "valid",
                    "e": "Image",
                    "m": "image/jpg",
                    "p": [ { "y": 108, "x": 108, "u": format!("https://preview.redd.it/{}.jpg?width=108&amp;crop=smart", id) } ],
                    "s": { "y": 1080, "x": 1080, "u": format!("https://preview.redd.it/{}.jpg?width=1080&amp;format=pjpg", id) }
                }),
            )
        })
        .collect();

    post_document(serde_json::json!({
        "is_gallery": true,
        "url": "https://www.reddit.com/gallery/abc123",
        "gallery_data": { "items": items },
        "media_metadata": metadata
    }))
}
