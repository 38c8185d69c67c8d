use std::future::Future;

use reqwest::header::{ACCEPT, HeaderValue};
use thiserror::Error;

use super::Joke;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("endpoint returned HTTP {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can produce a fresh joke, enabling scripted sources in tests.
pub trait JokeSource: Send + Sync {
    fn fetch_joke(&self) -> impl Future<Output = Result<Joke, FetchError>> + Send;
}

/// Joke source backed by a single HTTP GET against a JSON endpoint.
pub struct HttpJokeClient {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpJokeClient {
    /// Build a client for `endpoint` that identifies itself with `user_agent`.
    pub fn new(endpoint: impl Into<String>, user_agent: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self::with_http(endpoint, http))
    }

    pub fn with_http(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl JokeSource for HttpJokeClient {
    async fn fetch_joke(&self) -> Result<Joke, FetchError> {
        tracing::debug!("GET {}", self.endpoint);
        let response = self
            .http
            .get(&self.endpoint)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let joke: Joke = serde_json::from_slice(&body)?;
        Ok(joke)
    }
}
