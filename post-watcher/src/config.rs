//! Startup configuration, read from flags or the matching environment variables.

use crate::normalizer::{normalize_author, normalize_list};
use crate::types::{FetchConfig, FilterConfig, ScheduleConfig};
use clap::Parser;
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Clone)]
#[command(
    name = "post-watcher",
    version,
    about = "Watch a community feed and forward matching posts to a chat"
)]
pub struct Cli {
    /// Feed to poll (RSS or Atom)
    #[arg(long, env = "RSS_FEED")]
    pub feed_url: String,

    /// Bot API token of the messaging endpoint
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: String,

    /// Destination chat
    #[arg(long, env = "CHAT_ID")]
    pub chat_id: String,

    /// Seconds between two polls
    #[arg(long, env = "CHECK_INTERVAL", default_value_t = 300)]
    pub check_interval: u64,

    /// Comma separated user names that always trigger a notification
    #[arg(long, env = "TRACKED_USERS", default_value = "")]
    pub tracked_users: String,

    /// Comma separated title substrings
    #[arg(long, env = "KEYWORDS", default_value = "")]
    pub keywords: String,

    /// 1 to also notify on keyword matches, 0 for tracked users only
    #[arg(
        long,
        env = "ENABLE_KEYWORD_FILTER",
        default_value = "0",
        action = clap::ArgAction::Set,
        value_parser = parse_flag
    )]
    pub enable_keyword_filter: bool,

    /// Where the seen post ids are kept
    #[arg(long, env = "SEEN_FILE", default_value = "/mnt/data/seen.json")]
    pub seen_file: PathBuf,

    #[arg(long, env = "USER_AGENT", default_value = "post-watcher/0.1 (community feed notifier)")]
    pub user_agent: String,

    /// Feed request timeout in seconds
    #[arg(long, env = "FEED_TIMEOUT", default_value_t = 20)]
    pub feed_timeout: u64,

    /// Per-post document timeout in seconds, kept below the feed timeout
    #[arg(long, env = "DOCUMENT_TIMEOUT", default_value_t = 10)]
    pub document_timeout: u64,

    /// Extra pause in seconds after a failed cycle
    #[arg(long, env = "ERROR_PAUSE", default_value_t = 10)]
    pub error_pause: u64,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Run one cycle and exit
    #[arg(long)]
    pub once: bool,
}

/// Accepts `0`/`1` as well as `true`/`false`, `yes`/`no`, `on`/`off`.
pub fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(format!("expected 0 or 1, got '{}'", other)),
    }
}

impl Cli {
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            user_agent: self.user_agent.clone(),
            feed_timeout_seconds: self.feed_timeout.max(1),
            document_timeout_seconds: self.document_timeout,
            ..FetchConfig::default()
        }
    }

    pub fn filter_config(&self) -> FilterConfig {
        let tracked_authors: HashSet<String> = normalize_list(&self.tracked_users)
            .iter()
            .map(|user| normalize_author(user))
            .filter(|user| !user.is_empty())
            .collect();
        let keywords: BTreeSet<String> = normalize_list(&self.keywords).into_iter().collect();

        FilterConfig {
            tracked_authors,
            keywords,
            keyword_filter_enabled: self.enable_keyword_filter,
        }
    }

    pub fn schedule_config(&self) -> ScheduleConfig {
        ScheduleConfig {
            interval: Duration::from_secs(self.check_interval),
            error_pause: Duration::from_secs(self.error_pause),
        }
    }
}
