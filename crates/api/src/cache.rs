//! Shared query cache.
//!
//! Every distinct request (endpoint plus parameters, see [`QueryKey`]) owns
//! one slot in a [`QueryCache`]. A slot is a `watch` channel holding the
//! current [`QueryState`]; each consumer gets a [`Query`] handle subscribed
//! to it. Asking for a key whose slot already exists joins that slot instead
//! of issuing another request.
//!
//! # Examples
//!
//! ```
//! use kanban_api::{QueryCache, QueryKey};
//! use kanban_protocol::QueryState;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cache = QueryCache::<u32>::new();
//!
//! let mut first = cache.get_or_fetch(QueryKey::tasks(), || async { QueryState::Success(7) });
//! // Same key: joins the slot, the second request is never built.
//! let second = cache.get_or_fetch(QueryKey::tasks(), || async { QueryState::Success(8) });
//!
//! let settled = first.settled().await;
//! assert_eq!(settled.value().map(|v| **v), Some(7));
//! assert_eq!(second.state().value().map(|v| **v), Some(7));
//! assert_eq!(cache.len(), 1);
//! # }
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use kanban_protocol::{LifecycleFlags, QueryState};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

/// The state shared by all consumers of a slot.
///
/// Values are behind an `Arc` so that every consumer sees the same
/// allocation, which also lets derived views memoize on identity.
pub type SharedState<T> = QueryState<Arc<T>>;

/// The read endpoints of the board API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /boards`
    Boards,
    /// `GET /boards/{id}`
    BoardById,
    /// `GET /tasks`
    Tasks,
}

impl Endpoint {
    /// Returns the endpoint's name, as used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boards => "getBoards",
            Self::BoardById => "getBoardById",
            Self::Tasks => "getTasks",
        }
    }
}

/// Identifies one shareable query: an endpoint and its parameters.
///
/// The display form is the request path relative to the API base URL.
///
/// # Examples
///
/// ```
/// use kanban_api::QueryKey;
///
/// assert_eq!(QueryKey::boards().path(), "/boards");
/// assert_eq!(QueryKey::board("b1").path(), "/boards/b1");
/// assert_eq!(QueryKey::board("a/b").path(), "/boards/a%2Fb");
/// assert_ne!(QueryKey::board("b1"), QueryKey::board("b2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    endpoint: Endpoint,
    params: Vec<String>,
}

impl QueryKey {
    /// Key for the list of all boards.
    #[must_use]
    pub fn boards() -> Self {
        Self {
            endpoint: Endpoint::Boards,
            params: Vec::new(),
        }
    }

    /// Key for one board.
    #[must_use]
    pub fn board(id: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::BoardById,
            params: vec![id.into()],
        }
    }

    /// Key for the flat list of all tasks.
    #[must_use]
    pub fn tasks() -> Self {
        Self {
            endpoint: Endpoint::Tasks,
            params: Vec::new(),
        }
    }

    /// Returns the endpoint.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Returns the parameters, in path order.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Returns the request path, with parameters encoded as path segments.
    #[must_use]
    pub fn path(&self) -> String {
        match self.endpoint {
            Endpoint::Boards => "/boards".to_string(),
            Endpoint::Tasks => "/tasks".to_string(),
            Endpoint::BoardById => {
                let id = self.params.first().map_or("", String::as_str);
                format!("/boards/{}", utf8_percent_encode(id, NON_ALPHANUMERIC))
            }
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A consumer's live handle on a query slot.
///
/// Cloning a handle subscribes another consumer to the same slot.
#[derive(Debug)]
pub struct Query<T> {
    key: QueryKey,
    receiver: watch::Receiver<SharedState<T>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            receiver: self.receiver.clone(),
        }
    }
}

impl<T> Query<T> {
    fn new(key: QueryKey, receiver: watch::Receiver<SharedState<T>>) -> Self {
        Self { key, receiver }
    }

    /// Returns the key of the slot this handle observes.
    #[must_use]
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SharedState<T> {
        self.receiver.borrow().clone()
    }

    /// Returns the current lifecycle flags.
    #[must_use]
    pub fn flags(&self) -> LifecycleFlags {
        self.receiver.borrow().flags()
    }

    /// Returns `true` if the state changed since this handle last looked.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Waits for the next transition.
    ///
    /// Returns `false` once the slot can no longer change.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Waits until the state is no longer pending and returns it.
    pub async fn settled(&mut self) -> SharedState<T> {
        let settled = self
            .receiver
            .wait_for(|state| !state.is_loading())
            .await
            .map(|state| state.clone());
        match settled {
            Ok(state) => state,
            Err(_) => self.receiver.borrow().clone(),
        }
    }
}

type Slot<T> = Arc<watch::Sender<SharedState<T>>>;

/// A cache of query slots for one response type.
#[derive(Debug)]
pub struct QueryCache<T> {
    slots: Mutex<HashMap<QueryKey, Slot<T>>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle on the slot for `key`, issuing the request if the
    /// slot does not exist yet or holds a failure.
    ///
    /// A slot whose request is in flight or has succeeded is joined as is;
    /// `fetch` is not called in that case. A failed slot goes back to
    /// pending and is requested again, so reopening a view retries.
    ///
    /// # Panics
    ///
    /// Panics if a request has to be issued outside of a Tokio runtime.
    #[instrument(skip(self, fetch), fields(endpoint = key.endpoint().name(), key = %key))]
    pub fn get_or_fetch<F, Fut>(&self, key: QueryKey, fetch: F) -> Query<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = QueryState<T>> + Send + 'static,
    {
        let mut slots = self.lock();
        let slot = match slots.entry(key.clone()) {
            Entry::Occupied(entry) => {
                let slot = entry.get();
                if !slot.borrow().is_error() {
                    debug!("joining existing query slot");
                    return Query::new(key, slot.subscribe());
                }
                slot.send_replace(QueryState::Pending);
                Arc::clone(slot)
            }
            Entry::Vacant(entry) => Arc::clone(entry.insert(new_slot())),
        };
        let receiver = slot.subscribe();
        drop(slots);

        debug!("issuing request");
        spawn_request(key.clone(), slot, fetch());
        Query::new(key, receiver)
    }

    /// Issues a new request on the slot for `key`.
    ///
    /// The slot goes back to pending and resolves again. If a request for
    /// `key` is already in flight, the handle joins it instead.
    ///
    /// # Panics
    ///
    /// Panics if a request has to be issued outside of a Tokio runtime.
    #[instrument(skip(self, fetch), fields(endpoint = key.endpoint().name(), key = %key))]
    pub fn refetch<F, Fut>(&self, key: QueryKey, fetch: F) -> Query<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = QueryState<T>> + Send + 'static,
    {
        let mut slots = self.lock();
        let slot = match slots.entry(key.clone()) {
            Entry::Occupied(entry) => {
                let slot = entry.get();
                if slot.borrow().is_loading() {
                    debug!("request already in flight");
                    return Query::new(key, slot.subscribe());
                }
                slot.send_replace(QueryState::Pending);
                Arc::clone(slot)
            }
            Entry::Vacant(entry) => Arc::clone(entry.insert(new_slot())),
        };
        let receiver = slot.subscribe();
        drop(slots);

        debug!("re-issuing request");
        spawn_request(key.clone(), slot, fetch());
        Query::new(key, receiver)
    }

    /// Returns the current state of the slot for `key` without creating it.
    #[must_use]
    pub fn peek(&self, key: &QueryKey) -> Option<SharedState<T>> {
        self.lock().get(key).map(|slot| slot.borrow().clone())
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no query has been issued yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Slot<T>>> {
        // The map is only touched for lookups and inserts; a panic while
        // holding the lock cannot leave it half-updated.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn new_slot<T>() -> Slot<T> {
    let (sender, _) = watch::channel(QueryState::Pending);
    Arc::new(sender)
}

/// Runs `request` on its own task and publishes the result into `slot`.
///
/// The result is stored even if every consumer is gone.
fn spawn_request<T, Fut>(key: QueryKey, slot: Slot<T>, request: Fut)
where
    T: Send + Sync + 'static,
    Fut: Future<Output = QueryState<T>> + Send + 'static,
{
    tokio::spawn(async move {
        let state = request.await.map(Arc::new);
        match &state {
            QueryState::Success(_) => debug!(key = %key, "query resolved"),
            QueryState::Failed(error) => {
                warn!(key = %key, error = %error.display_message(), "query failed");
            }
            QueryState::Pending => {}
        }
        slot.send_replace(state);
    });
}
