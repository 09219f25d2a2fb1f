//! Terminal UI for the kanban viewer.
//!
//! This crate provides a Ratatui-based interface for browsing boards served
//! by the board API. It never writes: every screen is a projection of
//! shared, cached queries.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`route`]: The screens, addressed by path
//! - [`state`]: Navigation and selection state
//! - [`views`]: Query handles and memoized ordering per screen
//! - [`widgets`]: Rendering functions
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use kanban_api::ApiClient;
//! use kanban_tui::{App, Route, terminal};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let client = Arc::new(ApiClient::new("http://localhost:8080/api")?);
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(client, Route::BoardList);
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod event;
pub mod layout;
pub mod route;
pub mod state;
pub mod terminal;
pub mod views;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::App;
pub use route::Route;
pub use state::AppState;
