use crate::traits::SeenBackend;
use crate::types::Result;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info};

/// Post ids that have already been notified.
///
/// The set lives in memory for the whole process; the backend is read once in
/// [`SeenStore::load`] and rewritten in full after every insertion.
pub struct SeenStore {
    seen: HashSet<String>,
    backend: Box<dyn SeenBackend>,
}

impl SeenStore {
    /// Never fails: missing or unreadable state starts an empty set.
    pub fn load(backend: Box<dyn SeenBackend>) -> Self {
        let seen = match backend.load() {
            Ok(Some(ids)) => {
                let seen: HashSet<String> = ids.into_iter().collect();
                info!("Loaded seen posts: {} items from {}", seen.len(), backend.describe());
                seen
            }
            Ok(None) => {
                info!("{} not found, starting with empty set", backend.describe());
                HashSet::new()
            }
            Err(e) => {
                error!("Error loading {}: {}", backend.describe(), e);
                HashSet::new()
            }
        };

        Self { seen, backend }
    }

    pub fn contains(&self, post_id: &str) -> bool {
        self.seen.contains(post_id)
    }

    /// Record a dispatched post and persist the whole set.
    ///
    /// A failed write is logged; the id stays in memory so the post is not
    /// sent again by this process.
    pub fn insert(&mut self, post_id: &str) -> bool {
        if !self.seen.insert(post_id.to_string()) {
            return false;
        }

        let mut ids: Vec<String> = self.seen.iter().cloned().collect();
        ids.sort();
        match self.backend.persist(&ids) {
            Ok(()) => info!("Saved seen posts: {} items", ids.len()),
            Err(e) => error!("Error saving {}: {}", self.backend.describe(), e),
        }
        true
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// JSON array of ids in a single file.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeenBackend for JsonFileBackend {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Option<Vec<String>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn persist(&self, post_ids: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write a sibling file and rename it so a crash never leaves half a list
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_vec(post_ids)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Process-local backend, for tests and dry runs.
#[derive(Default)]
pub struct MemoryBackend {
    ids: Mutex<Option<Vec<String>>>,
}

impl MemoryBackend {
    pub fn with_ids(ids: Vec<String>) -> Self {
        Self {
            ids: Mutex::new(Some(ids)),
        }
    }
}

impl SeenBackend for MemoryBackend {
    fn describe(&self) -> String {
        "in-memory seen set".to_string()
    }

    fn load(&self) -> Result<Option<Vec<String>>> {
        Ok(self.ids.lock().map(|ids| ids.clone()).unwrap_or_default())
    }

    fn persist(&self, post_ids: &[String]) -> Result<()> {
        if let Ok(mut ids) = self.ids.lock() {
            *ids = Some(post_ids.to_vec());
        }
        Ok(())
    }
}
