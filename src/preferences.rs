//! Durable reader preferences.
//!
//! The only preference the browser keeps is the dark-mode flag, but the
//! store is a plain string key-value map so it stays the same shape as any
//! origin-scoped storage. `FilePreferences` keeps the map as JSON in the
//! config directory; `MemoryPreferences` backs tests and `--print` runs.
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Key under which the dark-mode flag is stored (`"true"` / `"false"`).
pub const DARK_MODE_KEY: &str = "dark_mode";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to write preferences file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value store with get/set.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

// ============================================================================
// In-memory store
// ============================================================================

/// Non-durable store.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    prefs: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.prefs.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.prefs.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.prefs.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// JSON object on disk, rewritten atomically on every `set`.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    prefs: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Open the store at `path`.
    ///
    /// A missing, unreadable or corrupt file yields an empty store; the next
    /// `set` replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let prefs = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt preferences file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No preferences file, starting empty");
                BTreeMap::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read preferences file");
                BTreeMap::new()
            }
        };
        Self { path, prefs }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), PreferenceError> {
        let json = serde_json::to_string_pretty(&self.prefs)?;
        atomic_write(&self.path, json.as_bytes()).map_err(|source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.prefs.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let previous = self.prefs.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist() {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => self.prefs.insert(key.to_string(), old),
                None => self.prefs.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

/// Write to a sibling temp file, sync, then rename over `dst`.
fn atomic_write(dst: &Path, content: &[u8]) -> std::io::Result<()> {
    let temp_path = dst.with_extension(format!("tmp.{}", std::process::id()));

    let result = (|| {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        drop(file);

        #[cfg(windows)]
        if dst.exists() {
            std::fs::remove_file(dst)?;
        }
        std::fs::rename(&temp_path, dst)
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("quire_prefs_test_{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("preferences.json");
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_memory_set_and_get() {
        let mut prefs = MemoryPreferences::new();
        assert_eq!(prefs.get(DARK_MODE_KEY), None);
        prefs.set(DARK_MODE_KEY, "true").unwrap();
        assert_eq!(prefs.get(DARK_MODE_KEY).as_deref(), Some("true"));
        assert_eq!(prefs.write_count(), 1);
    }

    #[test]
    fn test_memory_seed_is_not_a_write() {
        let prefs = MemoryPreferences::new().with(DARK_MODE_KEY, "true");
        assert_eq!(prefs.write_count(), 0);
        assert_eq!(prefs.get(DARK_MODE_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_file_missing_starts_empty() {
        let path = temp_path("missing");
        let prefs = FilePreferences::open(&path);
        assert_eq!(prefs.get(DARK_MODE_KEY), None);
    }

    #[test]
    fn test_file_survives_reopen() {
        let path = temp_path("reopen");
        let mut prefs = FilePreferences::open(&path);
        prefs.set(DARK_MODE_KEY, "true").unwrap();
        prefs.set(DARK_MODE_KEY, "false").unwrap();
        drop(prefs);

        let reopened = FilePreferences::open(&path);
        assert_eq!(reopened.get(DARK_MODE_KEY).as_deref(), Some("false"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_corrupt_is_ignored() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json {{").unwrap();
        let prefs = FilePreferences::open(&path);
        assert_eq!(prefs.get(DARK_MODE_KEY), None);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_write_failure_rolls_back() {
        let path = std::env::temp_dir()
            .join("quire_prefs_test_no_such_dir")
            .join("nested")
            .join("preferences.json");
        let mut prefs = FilePreferences::open(&path);
        assert!(prefs.set(DARK_MODE_KEY, "true").is_err());
        assert_eq!(prefs.get(DARK_MODE_KEY), None);
    }
}
