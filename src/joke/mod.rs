pub mod client;

pub use client::{FetchError, HttpJokeClient, JokeSource};

use serde::{Deserialize, Serialize};

/// A single joke as returned by the endpoint and stored in favorites.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Joke {
    /// Opaque identifier assigned by the endpoint.
    pub id: String,
    /// Joke body. Serialized as `joke` to match the endpoint's shape.
    #[serde(rename = "joke")]
    pub text: String,
    /// HTTP-style status echoed by the endpoint.
    pub status: i64,
}

impl Joke {
    pub fn new(id: impl Into<String>, text: impl Into<String>, status: i64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            status,
        }
    }

    /// The joke shown before the first fetch completes.
    pub fn placeholder() -> Self {
        Self::new("", "Knock knock...", 0)
    }
}
