use crate::favorites::{FavoritesStore, PersistenceError};
use crate::joke::{FetchError, Joke, JokeSource};

/// Identifies one started fetch. Only the ticket of the most recent fetch
/// may change the current joke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// What happened to a fetch result handed back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result replaced the current joke.
    Applied,
    /// The result belonged to an older fetch and was dropped.
    Stale,
    /// Another fetch was still outstanding, so none was started.
    Ignored,
}

/// Application state behind the UI: the joke on screen, whether it has been
/// favorited, and the favorites list.
pub struct JokeController {
    current: Joke,
    favorited: bool,
    favorites: FavoritesStore,
    latest_fetch: u64,
    in_flight: bool,
}

impl JokeController {
    pub fn new(favorites: FavoritesStore) -> Self {
        Self {
            current: Joke::placeholder(),
            favorited: false,
            favorites,
            latest_fetch: 0,
            in_flight: false,
        }
    }

    pub fn current(&self) -> &Joke {
        &self.current
    }

    pub fn is_favorited(&self) -> bool {
        self.favorited
    }

    pub fn favorites(&self) -> &[Joke] {
        self.favorites.jokes()
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    pub fn has_favorites(&self) -> bool {
        !self.favorites.is_empty()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    /// Load saved favorites. A failure leaves the list empty and is returned
    /// only so the caller can report it.
    pub fn load_favorites(&mut self) -> Result<usize, PersistenceError> {
        match self.favorites.load_from_disk() {
            Ok(jokes) => Ok(jokes.len()),
            Err(e) => {
                tracing::warn!("Starting with no favorites: {}", e);
                Err(e)
            }
        }
    }

    /// Mark a fetch as started. Returns `None` while another one is outstanding.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.in_flight {
            tracing::debug!("Fetch {} still in flight, ignoring request", self.latest_fetch);
            return None;
        }
        self.latest_fetch += 1;
        self.in_flight = true;
        tracing::debug!("Fetch {} started", self.latest_fetch);
        Some(FetchTicket(self.latest_fetch))
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// A successful result replaces the current joke and clears the favorited
    /// flag. A failure leaves the state alone and is handed back for reporting.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Joke, FetchError>,
    ) -> Result<FetchOutcome, FetchError> {
        if !self.in_flight || ticket.0 != self.latest_fetch {
            tracing::debug!("Dropping stale result of fetch {}", ticket.0);
            return Ok(FetchOutcome::Stale);
        }
        self.in_flight = false;

        match result {
            Ok(joke) => {
                tracing::info!("Fetched joke {}", joke.id);
                self.current = joke;
                self.favorited = false;
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                tracing::warn!("Could not retrieve or decode a joke: {}", e);
                Err(e)
            }
        }
    }

    /// Fetch and apply in one step.
    pub async fn fetch_joke<S: JokeSource>(
        &mut self,
        source: &S,
    ) -> Result<FetchOutcome, FetchError> {
        let Some(ticket) = self.begin_fetch() else {
            return Ok(FetchOutcome::Ignored);
        };
        let result = source.fetch_joke().await;
        self.apply_fetch(ticket, result)
    }

    /// Append the current joke to favorites unless it is already there.
    /// Returns true when a joke was appended.
    pub fn favorite_current(&mut self) -> bool {
        if self.favorited {
            return false;
        }
        self.favorites.add(self.current.clone());
        self.favorited = true;
        tracing::info!("Favorited joke {}", self.current.id);
        true
    }

    /// Save favorites to disk. Errors are logged and returned for reporting;
    /// the in-memory list is unaffected.
    pub fn persist(&self) -> Result<(), PersistenceError> {
        self.favorites.save_to_disk().inspect_err(|e| {
            tracing::error!("Unable to save favorites: {}", e);
        })
    }
}
