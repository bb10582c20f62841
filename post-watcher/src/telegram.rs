use crate::traits::Messenger;
use crate::types::{Result, WatchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const PARSE_MODE: &str = "HTML";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Debug, Serialize)]
struct SendPhoto<'a> {
    chat_id: &'a str,
    photo: &'a str,
    caption: &'a str,
    parse_mode: &'a str,
}

#[derive(Debug, Serialize)]
struct SendMediaGroup<'a> {
    chat_id: &'a str,
    media: Vec<InputMediaPhoto<'a>>,
}

#[derive(Debug, Serialize)]
pub struct InputMediaPhoto<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Bot API client bound to one destination chat.
pub struct TelegramMessenger {
    client: Client,
    token: String,
    chat_id: String,
}

impl std::fmt::Debug for TelegramMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramMessenger")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl TelegramMessenger {
    pub fn new(token: String, chat_id: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            token,
            chat_id,
        })
    }

    async fn call<T: Serialize + ?Sized>(&self, method: &str, payload: &T) -> Result<()> {
        let url = format!("{}/bot{}/{}", TELEGRAM_API_BASE, self.token, method);
        debug!("Calling Bot API method {}", method);

        // Drop the URL from transport errors, it embeds the token
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| WatchError::Http(e.without_url()))?;
        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| WatchError::Http(e.without_url()))?;

        if !status.is_success() || !body.ok {
            return Err(WatchError::Dispatch {
                method: method.to_string(),
                description: body
                    .description
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            });
        }
        Ok(())
    }
}

/// Album items; only the first carries the caption.
pub fn album_media<'a>(photo_urls: &'a [String], caption: &'a str) -> Vec<InputMediaPhoto<'a>> {
    photo_urls
        .iter()
        .enumerate()
        .map(|(i, url)| InputMediaPhoto {
            kind: "photo",
            media: url,
            caption: (i == 0).then_some(caption),
            parse_mode: (i == 0).then_some(PARSE_MODE),
        })
        .collect()
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.call(
            "sendMessage",
            &SendMessage {
                chat_id: &self.chat_id,
                text,
                parse_mode: PARSE_MODE,
            },
        )
        .await
    }

    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<()> {
        self.call(
            "sendPhoto",
            &SendPhoto {
                chat_id: &self.chat_id,
                photo: photo_url,
                caption,
                parse_mode: PARSE_MODE,
            },
        )
        .await
    }

    async fn send_album(&self, photo_urls: &[String], caption: &str) -> Result<()> {
        self.call(
            "sendMediaGroup",
            &SendMediaGroup {
                chat_id: &self.chat_id,
                media: album_media(photo_urls, caption),
            },
        )
        .await
    }
}
