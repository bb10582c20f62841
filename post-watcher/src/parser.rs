use crate::types::{FeedEntry, Result, WatchError};
use feed_rs::parser;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

static RE_ATOM_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<entry[\s>].*?</entry>").expect("valid atom entry pattern"));
static RE_RSS_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<item[\s>].*?</item>").expect("valid rss item pattern"));

pub struct FeedParser;

impl FeedParser {
    /// Parse feed markup into entries, in document order.
    ///
    /// A body the parser rejects is logged and then salvaged entry by entry, so
    /// one broken element does not hide the rest of the feed.
    pub fn parse_entries(content: &str) -> Vec<FeedEntry> {
        debug!("Parsing feed content ({} bytes)", content.len());

        if !Self::is_valid_feed_content(content) {
            warn!("Feed body does not look like RSS or Atom");
        }

        match Self::parse_strict(content) {
            Ok(entries) => {
                info!("Parsed feed with {} entries", entries.len());
                entries
            }
            Err(e) => {
                warn!("Malformed feed body, recovering entries individually: {}", e);
                let entries = Self::recover_entries(content);
                info!("Recovered {} entries from malformed feed", entries.len());
                entries
            }
        }
    }

    fn parse_strict(content: &str) -> Result<Vec<FeedEntry>> {
        let feed = parser::parse(content.as_bytes())
            .map_err(|e| WatchError::Parse(format!("Failed to parse feed: {}", e)))?;

        Ok(feed.entries.into_iter().map(Self::convert_entry).collect())
    }

    fn recover_entries(content: &str) -> Vec<FeedEntry> {
        let atom = RE_ATOM_ENTRY.find_iter(content).map(|m| {
            format!(
                r#"<feed xmlns="http://www.w3.org/2005/Atom">{}</feed>"#,
                m.as_str()
            )
        });
        let rss = RE_RSS_ITEM
            .find_iter(content)
            .map(|m| format!(r#"<rss version="2.0"><channel>{}</channel></rss>"#, m.as_str()));

        atom.chain(rss)
            .filter_map(|wrapped| match Self::parse_strict(&wrapped) {
                Ok(entries) => Some(entries),
                Err(e) => {
                    debug!("Dropping unrecoverable feed element: {}", e);
                    None
                }
            })
            .flatten()
            .collect()
    }

    fn convert_entry(entry: feed_rs::model::Entry) -> FeedEntry {
        let title = entry.title.map(|t| t.content).unwrap_or_default();

        // Prefer the alternate (HTML page) link over self/enclosure links
        let link = entry
            .links
            .iter()
            .find(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
            .or_else(|| entry.links.first())
            .map(|l| l.href.clone())
            .unwrap_or_default();

        let author = entry
            .authors
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_default();

        // Atom feeds carry the post body in <content>, RSS in <description>
        let summary = entry
            .summary
            .map(|s| s.content)
            .filter(|s| !s.trim().is_empty())
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default();

        FeedEntry {
            link,
            author,
            title,
            summary,
        }
    }

    pub fn is_valid_feed_content(content: &str) -> bool {
        let content_lower = content.to_lowercase();

        content_lower.contains("<rss")
            || content_lower.contains("<feed")
            || content_lower.contains("<channel")
            || content_lower.contains("xmlns:atom")
    }
}
