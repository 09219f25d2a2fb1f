//! Sample boards and tasks for tests and demonstrations.
//!
//! # Examples
//!
//! ```
//! use kanban_protocol::{ordered, sample};
//!
//! let board = sample::sprint_board();
//! let tasks = sample::sprint_tasks();
//! let todo = ordered(&tasks, &board.columns[0].id);
//! assert_eq!(todo[0].title, "Review");
//! ```

use crate::model::{Board, Column, Deadline, Task};

/// A board `b1` named "Sprint" with a single empty column `c1` "Todo".
#[must_use]
pub fn sprint_board() -> Board {
    Board {
        id: "b1".to_string(),
        name: "Sprint".to_string(),
        columns: vec![Column {
            id: "c1".to_string(),
            name: "Todo".to_string(),
            tasks: Vec::new(),
        }],
    }
}

/// Tasks for [`sprint_board`]: two in `c1` and one in a column the board
/// does not have.
#[must_use]
pub fn sprint_tasks() -> Vec<Task> {
    vec![
        Task::new("t1", "c1", "Write spec", Deadline::from_millis(100))
            .with_description("Draft the viewer spec"),
        Task::new("t2", "c1", "Review", Deadline::from_millis(200))
            .with_description("Review the draft"),
        Task::new("t3", "other", "X", Deadline::from_millis(300)),
    ]
}

/// A board with three columns and tasks spread across them.
#[must_use]
pub fn release_board() -> Board {
    let column = |id: &str, name: &str, tasks: &[&str]| Column {
        id: id.to_string(),
        name: name.to_string(),
        tasks: tasks.iter().map(ToString::to_string).collect(),
    };
    Board {
        id: "b2".to_string(),
        name: "Release 1.0".to_string(),
        columns: vec![
            column("todo", "To Do", &["r1", "r2"]),
            column("doing", "In Progress", &["r3"]),
            column("done", "Done", &["r4"]),
        ],
    }
}

/// Tasks for [`release_board`].
#[must_use]
pub fn release_tasks() -> Vec<Task> {
    vec![
        Task::new("r1", "todo", "Write changelog", Deadline::from_millis(1_717_200_000_000))
            .with_description("Collect notable changes"),
        Task::new("r2", "todo", "Tag release", Deadline::from_millis(1_717_286_400_000))
            .with_description("Create and push the tag"),
        Task::new("r3", "doing", "Fix flaky test", Deadline::from_millis(1_717_113_600_000))
            .with_description("Stabilize the cache test"),
        Task::new("r4", "done", "Bump version", Deadline::from_millis(1_717_027_200_000)),
    ]
}
