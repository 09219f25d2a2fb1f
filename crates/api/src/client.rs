//! Board API client.
//!
//! This module provides the [`ApiClient`] struct, which issues the three read
//! queries of the board API through shared [`QueryCache`]s.

use std::future::Future;
use std::time::Duration;

use kanban_protocol::{Board, ErrorInfo, QueryState, Task};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::cache::{Query, QueryCache, QueryKey};
use crate::error::{Error, Result};

/// Read-only client for the board API.
///
/// Each query returns a live [`Query`] handle. Identical queries share one
/// cache slot: while a request is in flight, asking again joins it instead
/// of sending another.
///
/// Requests are spawned on the current Tokio runtime, so the query methods
/// must be called from within one.
///
/// # Examples
///
/// ```no_run
/// use kanban_api::ApiClient;
///
/// # async fn example() -> kanban_api::Result<()> {
/// let client = ApiClient::new("http://localhost:8080/api")?;
///
/// let mut boards = client.get_boards();
/// let state = boards.settled().await;
/// if let Some(boards) = state.value() {
///     for board in boards.iter() {
///         println!("{}", board.name);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    boards: QueryCache<Vec<Board>>,
    board: QueryCache<Board>,
    tasks: QueryCache<Vec<Task>>,
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url`, using the
    /// transport's default timeout behavior.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] if `base_url` is not an absolute
    /// `http` or `https` URL, or [`Error::Http`] if the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a client with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use kanban_api::ApiClient;
    ///
    /// let client = ApiClient::with_timeout("http://localhost:8080/api/", Some(Duration::from_secs(5)))
    ///     .expect("valid url");
    /// assert_eq!(client.base_url(), "http://localhost:8080/api");
    ///
    /// assert!(ApiClient::new("localhost:8080").is_err());
    /// ```
    #[instrument(fields(timeout_secs = timeout.map(|t| t.as_secs())))]
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = validate_base_url(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        debug!(base_url = %base_url, "API client ready");
        Ok(Self {
            http,
            base_url,
            boards: QueryCache::new(),
            board: QueryCache::new(),
            tasks: QueryCache::new(),
        })
    }

    /// Returns the base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Queries `GET /tasks`.
    pub fn get_tasks(&self) -> Query<Vec<Task>> {
        let key = QueryKey::tasks();
        let request = self.request(&key);
        self.tasks.get_or_fetch(key, || request)
    }

    /// Queries `GET /boards`.
    pub fn get_boards(&self) -> Query<Vec<Board>> {
        let key = QueryKey::boards();
        let request = self.request(&key);
        self.boards.get_or_fetch(key, || request)
    }

    /// Queries `GET /boards/{id}`, with `id` encoded as one path segment.
    pub fn get_board_by_id(&self, id: &str) -> Query<Board> {
        let key = QueryKey::board(id);
        let request = self.request(&key);
        self.board.get_or_fetch(key, || request)
    }

    /// Re-issues `GET /tasks` unless it is already in flight.
    pub fn refetch_tasks(&self) -> Query<Vec<Task>> {
        let key = QueryKey::tasks();
        let request = self.request(&key);
        self.tasks.refetch(key, || request)
    }

    /// Re-issues `GET /boards` unless it is already in flight.
    pub fn refetch_boards(&self) -> Query<Vec<Board>> {
        let key = QueryKey::boards();
        let request = self.request(&key);
        self.boards.refetch(key, || request)
    }

    /// Re-issues `GET /boards/{id}` unless it is already in flight.
    pub fn refetch_board(&self, id: &str) -> Query<Board> {
        let key = QueryKey::board(id);
        let request = self.request(&key);
        self.board.refetch(key, || request)
    }

    /// Builds the (lazy) request future for `key`.
    ///
    /// Nothing is sent until the cache decides to spawn it.
    fn request<T>(&self, key: &QueryKey) -> impl Future<Output = QueryState<T>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        fetch_json(self.http.clone(), format!("{}{}", self.base_url, key.path()))
    }
}

/// Checks that `url` is an absolute HTTP(S) URL and strips trailing slashes.
fn validate_base_url(url: &str) -> Result<String> {
    let invalid = |reason: String| Error::InvalidBaseUrl {
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(url.trim_end_matches('/').to_string()),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

/// Performs a GET and classifies the outcome into a terminal query state.
async fn fetch_json<T: DeserializeOwned>(http: reqwest::Client, url: String) -> QueryState<T> {
    let response = match http.get(&url).send().await {
        Ok(response) => response,
        Err(e) => return QueryState::Failed(ErrorInfo::client(e.to_string())),
    };

    let status = response.status();
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return QueryState::Failed(ErrorInfo::http_error(status.as_u16(), e.to_string())),
    };

    if !status.is_success() {
        return QueryState::Failed(ErrorInfo::http(status.as_u16(), error_body(&bytes)));
    }

    match kanban_protocol::decode(&bytes) {
        Ok(value) => QueryState::Success(value),
        Err(e) => QueryState::Failed(ErrorInfo::http_error(status.as_u16(), e.to_string())),
    }
}

/// Interprets an error response body: JSON when it parses, raw text
/// otherwise, `Null` when empty.
fn error_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).trim().to_string()))
}
