use crate::traits::Messenger;
use crate::types::{DispatchKind, MatchDecision, Post, Result, WatchError};
use tracing::{info, warn};

/// Titles longer than this are cut so a photo caption stays under the
/// endpoint's 1024 character limit even after escaping.
const MAX_TITLE_CHARS: usize = 600;

pub struct Notifier {
    messenger: Box<dyn Messenger>,
}

impl Notifier {
    pub fn new(messenger: Box<dyn Messenger>) -> Self {
        Self { messenger }
    }

    /// Format and deliver one notification.
    ///
    /// When the endpoint rejects a photo or album (an image URL it cannot
    /// fetch, say) the same body goes out as text instead. Transport errors
    /// and a rejected text message are returned to the caller.
    pub async fn notify(
        &self,
        decision: &MatchDecision,
        post: &Post,
        images: &[String],
    ) -> Result<DispatchKind> {
        let body = format_message(&decision.label, &post.author, &post.title, &post.link);
        let mut kind = DispatchKind::for_image_count(images.len());

        let sent = match kind {
            DispatchKind::Text => self.messenger.send_text(&body).await,
            DispatchKind::Photo => self.messenger.send_photo(&images[0], &body).await,
            DispatchKind::Album => self.messenger.send_album(images, &body).await,
        };
        match sent {
            Ok(()) => {}
            Err(WatchError::Dispatch {
                method,
                description,
            }) if kind != DispatchKind::Text => {
                warn!(
                    post_id = %post.post_id,
                    "{} rejected ({}), sending as text",
                    method,
                    description
                );
                self.messenger.send_text(&body).await?;
                kind = DispatchKind::Text;
            }
            Err(e) => return Err(e),
        }

        info!(
            post_id = %post.post_id,
            author = %post.author,
            ?kind,
            images = images.len(),
            author_match = decision.author_match,
            keyword_match = decision.keyword_match,
            "Sent post notification"
        );
        Ok(kind)
    }
}

/// Message body in the endpoint's HTML parse mode.
pub fn format_message(label: &str, author: &str, title: &str, link: &str) -> String {
    let author = if author.is_empty() { "unknown" } else { author };

    format!(
        "🕵️ New post ({})\n\n<b>Author:</b> {}\n\n<b>{}</b>\n\n<a href=\"{}\">Open post</a>",
        escape_html(label),
        escape_html(author),
        escape_html(&truncate_chars(title, MAX_TITLE_CHARS)),
        escape_attr(link),
    )
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}
