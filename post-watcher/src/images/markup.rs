use crate::traits::ImageStrategy;
use crate::types::{ImageSet, Post};
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

/// Last resort: the first `<img>` embedded in the entry's HTML summary.
pub struct MarkupFallback;

#[async_trait]
impl ImageStrategy for MarkupFallback {
    fn strategy_name(&self) -> &'static str {
        "markup"
    }

    async fn resolve(&self, post: &Post) -> Option<ImageSet> {
        let image = extract_first_image(&post.summary)?;
        debug!(post_id = %post.post_id, %image, "Found image in entry markup");
        Some(vec![image])
    }
}

/// Source of the first image element, un-escaped and forced to an absolute https URL.
pub fn extract_first_image(html: &str) -> Option<String> {
    if html.trim().is_empty() {
        return None;
    }

    let selector = Selector::parse("img[src]").ok()?;
    let fragment = Html::parse_fragment(html);
    let src = fragment
        .select(&selector)
        .next()?
        .value()
        .attr("src")?
        .trim()
        .replace("&amp;", "&");

    if src.is_empty() {
        return None;
    }

    match src.strip_prefix("//") {
        Some(rest) => Some(format!("https://{}", rest)),
        None => Some(src),
    }
}
