use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::LANG_STORE_KEY;
use crate::error::Result;
use crate::models::Language;

/// Persistent key-value storage for viewer preferences.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Store backed by a single JSON file, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, StoredEntry>,
}

impl JsonFileStore {
    /// Open the store; a missing or unreadable file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "ignoring corrupt preference store");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "preference store unreadable");
                BTreeMap::new()
            }
        };
        JsonFileStore { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    fn entry(&self, key: &str) -> Option<&StoredEntry> {
        self.entries.get(key)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                updated_at: Utc::now(),
            },
        );
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        debug!(key, path = %self.path.display(), "preference saved");
        Ok(())
    }
}

/// Stored language, or the default when absent or unrecognized.
pub fn load_language(store: &dyn KeyValueStore) -> Language {
    Language::from_code_or_default(store.get(LANG_STORE_KEY).as_deref())
}

pub fn save_language(store: &mut dyn KeyValueStore, lang: Language) -> Result<()> {
    store.set(LANG_STORE_KEY, lang.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_defaults_to_zh() {
        let mut store = MemoryStore::new();
        assert_eq!(load_language(&store), Language::Zh);

        store.set(LANG_STORE_KEY, "klingon").unwrap();
        assert_eq!(load_language(&store), Language::Zh);

        save_language(&mut store, Language::En).unwrap();
        assert_eq!(load_language(&store), Language::En);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("store.json");

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get(LANG_STORE_KEY), None);
        save_language(&mut store, Language::En).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(load_language(&reopened), Language::En);
        let entry = reopened.entry(LANG_STORE_KEY).unwrap();
        assert_eq!(entry.value, "en");
        assert!(entry.updated_at <= Utc::now());
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(load_language(&store), Language::Zh);
    }
}
