//! Essay data sources.
//!
//! The collection is a static JSON export read once at startup. Anything
//! that goes wrong while reading it is a [`SourceError`], which the
//! controller turns into an inline message rather than a crash.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::types::{Essay, SourceError};

/// Provider of the full, ordered essay collection.
pub trait DataSource {
    fn load(&self) -> Result<Vec<Essay>, SourceError>;
}

/// Reads the collection from a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Maximum accepted data file size (64 MB).
    const MAX_FILE_SIZE: u64 = 64 * 1_048_576;

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for JsonFileSource {
    fn load(&self) -> Result<Vec<Essay>, SourceError> {
        match std::fs::metadata(&self.path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(SourceError::TooLarge(meta.len()));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::Missing(self.path.clone()));
            }
            Err(e) => return Err(SourceError::Io(e)),
            Ok(_) => {}
        }

        let bytes = std::fs::read(&self.path)?;
        let essays: Vec<Essay> = serde_json::from_slice(&bytes)?;
        ensure_unique_ids(&essays)?;

        tracing::info!(
            path = %self.path.display(),
            count = essays.len(),
            "Loaded essay data"
        );
        Ok(essays)
    }
}

/// In-memory collection. Passing `None` models a session where the data
/// never arrived.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    essays: Option<Vec<Essay>>,
}

impl StaticSource {
    pub fn new(essays: Vec<Essay>) -> Self {
        Self {
            essays: Some(essays),
        }
    }

    pub fn unavailable() -> Self {
        Self { essays: None }
    }
}

impl DataSource for StaticSource {
    fn load(&self) -> Result<Vec<Essay>, SourceError> {
        let essays = self
            .essays
            .clone()
            .ok_or_else(|| SourceError::Missing(PathBuf::from("<static>")))?;
        ensure_unique_ids(&essays)?;
        Ok(essays)
    }
}

fn ensure_unique_ids(essays: &[Essay]) -> Result<(), SourceError> {
    let mut seen = HashSet::with_capacity(essays.len());
    for essay in essays {
        if !seen.insert(essay.id) {
            return Err(SourceError::DuplicateId(essay.id));
        }
    }
    Ok(())
}
