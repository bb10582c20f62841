pub mod types;
pub mod traits;
pub mod config;
pub mod logging;
pub mod fetcher;
pub mod parser;
pub mod sources;
pub mod normalizer;
pub mod classifier;
pub mod images;
pub mod notifier;
pub mod telegram;
pub mod seen_store;
pub mod pipeline;
pub mod scheduler;

pub use types::*;
pub use classifier::Classifier;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use images::ImageResolver;
pub use notifier::Notifier;
pub use pipeline::{CycleReport, Watcher};
pub use scheduler::{Scheduler, WatchState};
pub use seen_store::{JsonFileBackend, MemoryBackend, SeenStore};
pub use telegram::TelegramMessenger;
