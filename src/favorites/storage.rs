use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::joke::Joke;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read favorites from {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse favorites in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write favorites to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to encode favorites: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Trait for favorites persistence, enabling mock storage in tests.
#[cfg_attr(test, mockall::automock)]
pub trait FavoritesStorage: Send + Sync {
    fn save_favorites(&self, jokes: &[Joke]) -> Result<(), PersistenceError>;
    fn load_favorites(&self) -> Result<Vec<Joke>, PersistenceError>;
}

/// Favorites kept as a single pretty-printed JSON array on disk.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_err(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl FavoritesStorage for FileStorage {
    /// Replace the file with a full snapshot. The JSON goes to a temp file in
    /// the same directory which is then renamed over the target, so readers
    /// see either the old or the new list.
    fn save_favorites(&self, jokes: &[Joke]) -> Result<(), PersistenceError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.write_err(e))?;

        let json = serde_json::to_string_pretty(jokes)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.write_err(e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| self.write_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.write_err(e.error))?;

        tracing::debug!("Wrote favorites to {}:\n{}", self.path.display(), json);
        Ok(())
    }

    fn load_favorites(&self) -> Result<Vec<Joke>, PersistenceError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&contents).map_err(|source| PersistenceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}
