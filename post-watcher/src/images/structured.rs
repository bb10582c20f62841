use super::document::parse_post_document;
use crate::traits::{DocumentSource, ImageStrategy};
use crate::types::{ImageSet, Post};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Preferred strategy: read images out of the post's structured document.
pub struct StructuredLookup {
    source: Arc<dyn DocumentSource>,
}

impl StructuredLookup {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl ImageStrategy for StructuredLookup {
    fn strategy_name(&self) -> &'static str {
        "structured"
    }

    async fn resolve(&self, post: &Post) -> Option<ImageSet> {
        if post.link.is_empty() {
            return None;
        }

        let body = match self.source.fetch_document(&post.link).await {
            Ok(body) => body,
            Err(e) => {
                warn!(post_id = %post.post_id, "Structured lookup failed: {}", e);
                return None;
            }
        };

        let data = match parse_post_document(&body) {
            Ok(data) => data,
            Err(e) => {
                warn!(post_id = %post.post_id, "Unexpected post document shape: {}", e);
                return None;
            }
        };

        let images = data.best_images();
        debug!(
            post_id = %post.post_id,
            count = images.as_ref().map_or(0, Vec::len),
            "Structured lookup finished"
        );
        images
    }
}
