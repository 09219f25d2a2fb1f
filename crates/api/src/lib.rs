//! REST client for the kanban viewer.
//!
//! This crate talks to the board API and hands out live, shared query
//! handles. It never mutates server state.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`ApiClient`]: the three read queries (`get_tasks`, `get_boards`,
//!   `get_board_by_id`) and their `refetch_*` counterparts
//! - [`QueryCache`], [`QueryKey`], and [`Query`]: the shared cache every
//!   query goes through
//! - [`Error`]: errors raised while building a client
//!
//! Request failures are not [`Error`]s: they end up in the query's
//! [`QueryState`](kanban_protocol::QueryState) so that the view that issued
//! the query can render them.
//!
//! # Sharing
//!
//! Two consumers asking for the same endpoint with the same parameters get
//! handles on the same slot, and only one request is sent:
//!
//! ```no_run
//! use kanban_api::ApiClient;
//!
//! # async fn example() -> kanban_api::Result<()> {
//! let client = ApiClient::new("http://localhost:8080/api")?;
//!
//! // Every column of a board asks for all tasks.
//! let mut todo = client.get_tasks();
//! let doing = client.get_tasks();
//!
//! todo.settled().await;
//! assert!(!doing.flags().is_loading);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod error;

pub use cache::{Endpoint, Query, QueryCache, QueryKey, SharedState};
pub use client::ApiClient;
pub use error::{Error, Result};
