//! Typed view of the per-post JSON document.
//!
//! Only the fields the image tiers read are modelled, and every one of them is
//! optional: a missing field means "this tier has nothing", never an error.

use crate::types::{ImageSet, Result, WatchError, MAX_IMAGES};
use serde::Deserialize;
use std::collections::BTreeMap;
use url::Url;

const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

#[derive(Debug, Deserialize)]
struct Listing {
    data: Option<ListingData>,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: Option<PostData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostData {
    pub is_gallery: Option<bool>,
    pub gallery_data: Option<GalleryData>,
    pub media_metadata: Option<BTreeMap<String, MediaMetadata>>,
    pub url_overridden_by_dest: Option<String>,
    pub url: Option<String>,
    pub preview: Option<Preview>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GalleryData {
    #[serde(default)]
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Deserialize)]
pub struct GalleryItem {
    pub media_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaMetadata {
    /// Source rendition
    pub s: Option<Rendition>,
    /// Downscaled renditions, smallest first
    #[serde(default)]
    pub p: Vec<Rendition>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Rendition {
    pub u: Option<String>,
    pub gif: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewImage {
    pub source: Option<PreviewSource>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewSource {
    pub url: Option<String>,
}

/// Pull the post object out of `[0].data.children[0].data`.
pub fn parse_post_document(body: &str) -> Result<PostData> {
    let listings: Vec<Listing> = serde_json::from_str(body)?;

    listings
        .into_iter()
        .next()
        .and_then(|listing| listing.data)
        .and_then(|data| data.children.into_iter().next())
        .and_then(|child| child.data)
        .ok_or_else(|| WatchError::Parse("post document has no post data".to_string()))
}

impl PostData {
    /// Walk the tiers in priority order and return the first non-empty one.
    pub fn best_images(&self) -> Option<ImageSet> {
        self.gallery_images()
            .or_else(|| self.media_images())
            .or_else(|| self.direct_image())
            .or_else(|| self.preview_image())
    }

    /// Explicit gallery items, in gallery order.
    pub fn gallery_images(&self) -> Option<ImageSet> {
        let items = &self.gallery_data.as_ref()?.items;
        let metadata = self.media_metadata.as_ref()?;

        let images: ImageSet = items
            .iter()
            .filter_map(|item| item.media_id.as_ref())
            .filter_map(|id| metadata.get(id))
            .filter_map(MediaMetadata::best_url)
            .take(MAX_IMAGES)
            .collect();
        non_empty(images)
    }

    /// Gallery posts whose item list is missing: every media entry we have.
    pub fn media_images(&self) -> Option<ImageSet> {
        if self.is_gallery != Some(true) {
            return None;
        }

        let images: ImageSet = self
            .media_metadata
            .as_ref()?
            .values()
            .filter_map(MediaMetadata::best_url)
            .take(MAX_IMAGES)
            .collect();
        non_empty(images)
    }

    pub fn direct_image(&self) -> Option<ImageSet> {
        let url = self
            .url_overridden_by_dest
            .as_deref()
            .or(self.url.as_deref())
            .map(unescape_url)?;

        if has_image_extension(&url) {
            Some(vec![url])
        } else {
            None
        }
    }

    pub fn preview_image(&self) -> Option<ImageSet> {
        let url = self
            .preview
            .as_ref()?
            .images
            .first()?
            .source
            .as_ref()?
            .url
            .as_deref()
            .map(unescape_url)?;

        non_empty(vec![url]).filter(|images| !images[0].is_empty())
    }
}

impl MediaMetadata {
    fn best_url(&self) -> Option<String> {
        let source = self
            .s
            .as_ref()
            .and_then(|s| s.u.as_deref().or(s.gif.as_deref()));
        let largest_preview = self.p.iter().rev().find_map(|p| p.u.as_deref());

        source
            .or(largest_preview)
            .map(unescape_url)
            .filter(|u| !u.is_empty())
    }
}

fn non_empty(images: ImageSet) -> Option<ImageSet> {
    if images.is_empty() {
        None
    } else {
        Some(images)
    }
}

/// The document escapes query separators as `&amp;`.
pub fn unescape_url(url: &str) -> String {
    url.trim().replace("&amp;", "&")
}

pub fn has_image_extension(url: &str) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_lowercase(),
    };

    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
