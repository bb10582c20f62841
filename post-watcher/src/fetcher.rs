use crate::traits::DocumentSource;
use crate::types::{FetchConfig, Result, WatchError};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Instant;
use tracing::{debug, info};
use url::Url;

/// HTTP client shared by the feed fetch and the per-post document lookup.
///
/// Both carry the configured `User-Agent`; the upstream throttles clients that
/// identify as a generic HTTP library.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.feed_timeout())
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn fetch_feed(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();
        debug!("Fetching feed: {}", url);

        let response = self.client.get(url).send().await?;
        let response = ensure_success(response, url)?;
        let content = response.text().await?;

        info!(
            "Fetched feed: {} ({} bytes in {}ms)",
            url,
            content.len(),
            start_time.elapsed().as_millis()
        );
        Ok(content)
    }

    /// Fetch the structured document for a post, with the shorter lookup timeout.
    pub async fn fetch_post_document(&self, link: &str) -> Result<String> {
        let url = document_url(link)?;
        debug!("Fetching post document: {}", url);

        let response = self
            .client
            .get(url.as_str())
            .timeout(self.config.document_timeout())
            .send()
            .await?;
        let response = ensure_success(response, url.as_str())?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl DocumentSource for Fetcher {
    async fn fetch_document(&self, link: &str) -> Result<String> {
        self.fetch_post_document(link).await
    }
}

fn ensure_success(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(WatchError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response)
}

/// `https://host/r/x/comments/abc/title/?utm=1` becomes
/// `https://host/r/x/comments/abc/title/.json`.
pub fn document_url(link: &str) -> Result<Url> {
    let mut url = Url::parse(link.trim())?;
    url.set_query(None);
    url.set_fragment(None);

    let path = url.path();
    let path = if path.ends_with('/') {
        format!("{}.json", path)
    } else {
        format!("{}/.json", path)
    };
    url.set_path(&path);
    Ok(url)
}
