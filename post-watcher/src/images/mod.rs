//! Image resolution as an ordered chain of strategies.

pub mod document;
pub mod markup;
pub mod structured;

pub use document::{parse_post_document, PostData};
pub use markup::{extract_first_image, MarkupFallback};
pub use structured::StructuredLookup;

use crate::traits::{DocumentSource, ImageStrategy};
use crate::types::{ImageSet, Post, MAX_IMAGES};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ImageResolver {
    strategies: Vec<Box<dyn ImageStrategy>>,
}

impl ImageResolver {
    pub fn new(strategies: Vec<Box<dyn ImageStrategy>>) -> Self {
        Self { strategies }
    }

    /// Structured document first, entry markup second.
    pub fn standard(documents: Arc<dyn DocumentSource>) -> Self {
        Self::new(vec![
            Box::new(StructuredLookup::new(documents)),
            Box::new(MarkupFallback),
        ])
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.strategy_name()).collect()
    }

    /// Run the chain until a strategy yields images. An empty set is a valid outcome.
    pub async fn resolve(&self, post: &Post) -> ImageSet {
        for strategy in &self.strategies {
            match strategy.resolve(post).await {
                Some(mut images) if !images.is_empty() => {
                    images.truncate(MAX_IMAGES);
                    info!(
                        post_id = %post.post_id,
                        strategy = strategy.strategy_name(),
                        count = images.len(),
                        "Resolved images"
                    );
                    return images;
                }
                _ => debug!(
                    post_id = %post.post_id,
                    strategy = strategy.strategy_name(),
                    "No images, trying next strategy"
                ),
            }
        }

        debug!(post_id = %post.post_id, "No images found, sending text only");
        Vec::new()
    }
}
