//! Shared protocol types for the kanban viewer.
//!
//! This crate defines the data model served by the board API, the lifecycle
//! of a query against that API, and the pure derivations the views build on.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`model`]: `Board`, `Column`, `Task`, and `Deadline`
//! - [`query`]: `QueryState`, `ErrorInfo`, and the status projection
//! - [`ordering`]: per-column task ordering and its memoized form
//! - [`message`]: TUI event messages
//! - [`sample`]: sample data for tests and demos
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Projecting a query and ordering its tasks:
//!
//! ```
//! use kanban_protocol::{Outcome, QueryState, ordered, sample};
//!
//! let state = QueryState::Success(sample::sprint_tasks());
//!
//! match state.project() {
//!     Outcome::Ready(tasks) => {
//!         let todo = ordered(tasks, "c1");
//!         assert_eq!(todo.len(), 2);
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

pub mod error;
pub mod message;
pub mod model;
pub mod ordering;
pub mod query;
pub mod sample;

// Re-export primary types at crate root for convenience
pub use error::{ProtocolError, Result};
pub use message::Message;
pub use model::{Board, Column, Deadline, Task, decode};
pub use ordering::{MemoizedOrdering, ordered};
pub use query::{ErrorInfo, LOADING, LifecycleFlags, Outcome, QueryState, UNKNOWN_ERROR};
