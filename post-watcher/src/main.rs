use anyhow::Context;
use clap::Parser;
use post_watcher::config::Cli;
use post_watcher::sources::RssFeedSource;
use post_watcher::{
    logging, Classifier, Fetcher, ImageResolver, JsonFileBackend, Notifier, Scheduler, SeenStore,
    TelegramMessenger, Watcher,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let filter = cli.filter_config();
    let mut tracked: Vec<&String> = filter.tracked_authors.iter().collect();
    tracked.sort();
    info!("RSS_URL = {}", cli.feed_url);
    info!("Tracked users: {:?}", tracked);
    info!(
        "Keyword filter: {}, keywords={:?}",
        filter.keyword_filter_enabled, filter.keywords
    );

    let fetch_config = cli.fetch_config();
    let fetcher = Arc::new(
        Fetcher::new(fetch_config.clone()).context("failed to build HTTP client")?,
    );
    let messenger = TelegramMessenger::new(
        cli.telegram_token.clone(),
        cli.chat_id.clone(),
        fetch_config.feed_timeout(),
    )
    .context("failed to build messaging client")?;

    let resolver = ImageResolver::standard(fetcher.clone());
    info!("Image strategies: {:?}", resolver.strategy_names());

    let mut watcher = Watcher::new(
        Box::new(RssFeedSource::new(cli.feed_url.clone(), fetcher)),
        Classifier::new(filter),
        resolver,
        Notifier::new(Box::new(messenger)),
        SeenStore::load(Box::new(JsonFileBackend::new(cli.seen_file.clone()))),
    );

    info!("Bot started (RSS mode)");

    if cli.once {
        if let Err(e) = watcher.run_cycle().await {
            error!("Error in watch cycle: {}", e);
            return Err(e.into());
        }
        return Ok(());
    }

    let mut scheduler = Scheduler::new(cli.schedule_config());
    scheduler.run(&mut watcher).await;
    Ok(())
}
