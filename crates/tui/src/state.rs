//! Application state management.
//!
//! This module defines the navigation and selection state of the TUI. The
//! data shown on screen lives in the views; selection indices are clamped
//! against the counts the views report.

use crate::route::Route;

/// The application state.
///
/// Contains the current route, the history used by "back", selection
/// tracking for both screens, and overlay visibility.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The screen being shown.
    pub route: Route,
    /// Routes to return to, most recent last.
    history: Vec<Route>,
    /// Highlighted entry of the board list.
    pub selected_board: usize,
    /// Focused column on the board screen.
    pub selected_column: usize,
    /// Highlighted task within the focused column, if any.
    pub selected_task: Option<usize>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
}

impl AppState {
    /// Creates a new state showing `route`, with an empty history.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_tui::{AppState, Route};
    ///
    /// let state = AppState::new(Route::BoardList);
    /// assert_eq!(state.selected_board, 0);
    /// assert!(!state.can_go_back());
    /// ```
    #[must_use]
    pub fn new(route: Route) -> Self {
        Self {
            route,
            history: Vec::new(),
            selected_board: 0,
            selected_column: 0,
            selected_task: None,
            help_visible: false,
        }
    }

    /// Shows `route`, remembering the current one for [`AppState::go_back`].
    ///
    /// Column and task selection start over on the new screen.
    pub fn navigate_to(&mut self, route: Route) {
        let previous = std::mem::replace(&mut self.route, route);
        self.history.push(previous);
        self.reset_board_selection();
    }

    /// Returns to the previous route.
    ///
    /// Returns `false` when there is nowhere to go back to.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_tui::{AppState, Route};
    ///
    /// let mut state = AppState::new(Route::BoardList);
    /// state.navigate_to(Route::board("b1"));
    ///
    /// assert!(state.go_back());
    /// assert_eq!(state.route, Route::BoardList);
    /// assert!(!state.go_back());
    /// ```
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(route) => {
                self.route = route;
                self.reset_board_selection();
                true
            }
            None => false,
        }
    }

    /// Returns `true` if [`AppState::go_back`] would change the route.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::take(&mut self.help_visible)
    }

    /// Moves the board list highlight up, wrapping around.
    pub fn select_previous_board(&mut self, board_count: usize) {
        self.selected_board = step_back(self.selected_board, board_count);
    }

    /// Moves the board list highlight down, wrapping around.
    pub fn select_next_board(&mut self, board_count: usize) {
        self.selected_board = step_forward(self.selected_board, board_count);
    }

    /// Focuses the column to the left, wrapping around.
    pub fn navigate_left(&mut self, column_count: usize) {
        self.selected_column = step_back(self.selected_column, column_count);
        self.selected_task = None;
    }

    /// Focuses the column to the right, wrapping around.
    pub fn navigate_right(&mut self, column_count: usize) {
        self.selected_column = step_forward(self.selected_column, column_count);
        self.selected_task = None;
    }

    /// Moves the task highlight up within the focused column.
    pub fn navigate_up(&mut self, task_count: usize) {
        self.selected_task = match (task_count, self.selected_task) {
            (0, _) => None,
            (_, None) => Some(0),
            (count, Some(idx)) => Some(step_back(idx, count)),
        };
    }

    /// Moves the task highlight down within the focused column.
    pub fn navigate_down(&mut self, task_count: usize) {
        self.selected_task = match (task_count, self.selected_task) {
            (0, _) => None,
            (_, None) => Some(0),
            (count, Some(idx)) => Some(step_forward(idx, count)),
        };
    }

    /// Clears the task highlight.
    pub fn clear_selection(&mut self) {
        self.selected_task = None;
    }

    /// Keeps the board list highlight within `board_count`.
    ///
    /// The list can shrink under the selection after a refresh.
    pub fn clamp_board_selection(&mut self, board_count: usize) {
        self.selected_board = self.selected_board.min(board_count.saturating_sub(1));
    }

    /// Keeps the column focus and task highlight within the given counts.
    ///
    /// `task_count` is the number of tasks in the focused column after the
    /// column index has been clamped.
    pub fn clamp_board_page_selection(&mut self, column_count: usize, task_count: usize) {
        self.selected_column = self.selected_column.min(column_count.saturating_sub(1));
        if task_count == 0 {
            self.selected_task = None;
        } else if let Some(idx) = self.selected_task
            && idx >= task_count
        {
            self.selected_task = Some(task_count - 1);
        }
    }

    fn reset_board_selection(&mut self) {
        self.selected_column = 0;
        self.selected_task = None;
    }
}

fn step_forward(idx: usize, count: usize) -> usize {
    if count == 0 { 0 } else { (idx + 1) % count }
}

fn step_back(idx: usize, count: usize) -> usize {
    match count {
        0 => 0,
        _ if idx == 0 || idx >= count => count - 1,
        _ => idx - 1,
    }
}
