pub mod storage;

pub use storage::{FavoritesStorage, FileStorage, PersistenceError};

use crate::joke::Joke;

/// In-memory favorites list backed by a storage implementation.
///
/// The list only grows. Duplicate prevention is up to the caller.
pub struct FavoritesStore {
    jokes: Vec<Joke>,
    storage: Box<dyn FavoritesStorage>,
}

impl FavoritesStore {
    pub fn new(storage: Box<dyn FavoritesStorage>) -> Self {
        Self {
            jokes: Vec::new(),
            storage,
        }
    }

    pub fn add(&mut self, joke: Joke) {
        self.jokes.push(joke);
    }

    pub fn jokes(&self) -> &[Joke] {
        &self.jokes
    }

    pub fn len(&self) -> usize {
        self.jokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jokes.is_empty()
    }

    /// Write the whole list to storage. The in-memory list is kept either way.
    pub fn save_to_disk(&self) -> Result<(), PersistenceError> {
        self.storage.save_favorites(&self.jokes)?;
        tracing::info!("Saved {} favorites", self.jokes.len());
        Ok(())
    }

    /// Replace the in-memory list with what storage holds.
    /// On error the current list is left untouched.
    pub fn load_from_disk(&mut self) -> Result<&[Joke], PersistenceError> {
        self.jokes = self.storage.load_favorites()?;
        tracing::info!("Loaded {} favorites", self.jokes.len());
        Ok(&self.jokes)
    }
}
