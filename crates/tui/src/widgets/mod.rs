//! Widget components for the kanban viewer.
//!
//! Each widget is a function rendering borrowed data into a buffer, so the
//! same code serves the live terminal and the buffer-based tests.
//!
//! # Modules
//!
//! - [`board`]: a loaded board, its columns side by side
//! - [`board_list`]: one link per board
//! - [`column`]: one column with its ordered task cards
//! - [`task_card`]: one task
//! - [`status`]: loading and error states in place of content
//! - [`status_bar`]: the footer with route and keybinding hints
//! - [`help`]: the keybinding overlay
//!
//! # Example
//!
//! ```
//! use kanban_protocol::{ordered, sample, QueryState};
//! use kanban_tui::views::ColumnContent;
//! use kanban_tui::widgets;
//! use ratatui::{buffer::Buffer, layout::Rect};
//!
//! let board = sample::sprint_board();
//! let tasks = ordered(&sample::sprint_tasks(), "c1");
//! let columns = [ColumnContent {
//!     name: &board.columns[0].name,
//!     tasks: QueryState::Success(tasks.as_slice()),
//! }];
//!
//! let area = Rect::new(0, 0, 80, 24);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_board(&board.name, &columns, 0, Some(0), area, &mut buf);
//! ```

pub mod board;
pub mod board_list;
pub mod column;
pub mod help;
pub mod status;
pub mod status_bar;
pub mod task_card;

pub use board::render_board;
pub use board_list::render_board_list;
pub use column::{ColumnPosition, render_column};
pub use help::render_help_overlay;
pub use status::{render_outcome, render_status_message};
pub use status_bar::render_status_bar;
pub use task_card::render_task_card;
