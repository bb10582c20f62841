use crate::classifier::Classifier;
use crate::images::ImageResolver;
use crate::normalizer::normalize_entry;
use crate::notifier::Notifier;
use crate::seen_store::SeenStore;
use crate::traits::FeedSource;
use crate::types::Result;
use tracing::{debug, info};

/// Counters for one pass over the feed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub entries: usize,
    pub already_seen: usize,
    pub ineligible: usize,
    pub dispatched: usize,
}

/// Fetch, dedup, classify, resolve images and notify, one post at a time.
pub struct Watcher {
    source: Box<dyn FeedSource>,
    classifier: Classifier,
    resolver: ImageResolver,
    notifier: Notifier,
    seen: SeenStore,
}

impl Watcher {
    pub fn new(
        source: Box<dyn FeedSource>,
        classifier: Classifier,
        resolver: ImageResolver,
        notifier: Notifier,
        seen: SeenStore,
    ) -> Self {
        Self {
            source,
            classifier,
            resolver,
            notifier,
            seen,
        }
    }

    /// One pass over the feed in source order.
    ///
    /// A failed dispatch ends the cycle with that error. The post is left out
    /// of the seen-set so it is tried again next cycle.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        let entries = self.source.pull().await;
        let mut report = CycleReport {
            entries: entries.len(),
            ..Default::default()
        };

        for entry in entries {
            let post = normalize_entry(entry);

            if self.seen.contains(&post.post_id) {
                report.already_seen += 1;
                continue;
            }

            let decision = self.classifier.classify(&post.author, &post.title_lower());
            if !decision.is_eligible() {
                debug!(post_id = %post.post_id, author = %post.author, "Skipping post, no match");
                report.ineligible += 1;
                continue;
            }

            let images = self.resolver.resolve(&post).await;
            self.notifier.notify(&decision, &post, &images).await?;

            self.seen.insert(&post.post_id);
            report.dispatched += 1;
        }

        info!(
            source = %self.source.source_name(),
            entries = report.entries,
            already_seen = report.already_seen,
            ineligible = report.ineligible,
            dispatched = report.dispatched,
            "Cycle finished"
        );
        Ok(report)
    }

    pub fn seen(&self) -> &SeenStore {
        &self.seen
    }
}
