//! Data-bearing views.
//!
//! Each view owns the query handles for what it shows. Handles come from the
//! shared [`ApiClient`], so two views asking for the same data (every column
//! asks for all tasks) share one request and one result.

use std::sync::Arc;

use kanban_api::{ApiClient, Query, SharedState};
use kanban_protocol::{Board, Column, ErrorInfo, MemoizedOrdering, QueryState, Task};
use tracing::debug;

use crate::route::Route;

/// The board list screen.
#[derive(Debug)]
pub struct BoardListView {
    boards: Query<Vec<Board>>,
}

impl BoardListView {
    /// Opens the view, querying all boards.
    #[must_use]
    pub fn new(client: &ApiClient) -> Self {
        Self {
            boards: client.get_boards(),
        }
    }

    /// Returns the current state of the boards query.
    #[must_use]
    pub fn state(&self) -> SharedState<Vec<Board>> {
        self.boards.state()
    }

    /// Returns the number of boards loaded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state().value().map_or(0, |boards| boards.len())
    }

    /// Returns `true` when no board is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns where the link at `index` leads.
    #[must_use]
    pub fn link(&self, index: usize) -> Option<Route> {
        self.state()
            .value()
            .and_then(|boards| boards.get(index))
            .map(|board| Route::board(board.id.clone()))
    }

    /// Re-issues the boards query.
    pub fn refresh(&mut self, client: &ApiClient) {
        self.boards = client.refetch_boards();
    }
}

/// What a column renders: its name and its ordered tasks.
#[derive(Debug)]
pub struct ColumnContent<'a> {
    /// Column heading.
    pub name: &'a str,
    /// The column's tasks, newest deadline first, once loaded.
    pub tasks: QueryState<&'a [Task]>,
}

/// One column of the board screen.
#[derive(Debug)]
pub struct ColumnView {
    id: String,
    name: String,
    tasks: Query<Vec<Task>>,
    ordering: MemoizedOrdering,
}

impl ColumnView {
    /// Opens the view for `column`, querying all tasks.
    #[must_use]
    pub fn new(client: &ApiClient, column: &Column) -> Self {
        Self {
            id: column.id.clone(),
            name: column.name.clone(),
            tasks: client.get_tasks(),
            ordering: MemoizedOrdering::new(),
        }
    }

    /// Returns the column id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column's content, ordering the tasks if the list changed.
    pub fn content(&mut self) -> ColumnContent<'_> {
        let tasks = match self.tasks.state() {
            QueryState::Pending => QueryState::Pending,
            QueryState::Failed(error) => QueryState::Failed(error),
            QueryState::Success(all) => QueryState::Success(self.ordering.get(&all, &self.id)),
        };
        ColumnContent {
            name: &self.name,
            tasks,
        }
    }

    /// Returns the number of tasks the column shows.
    pub fn task_count(&mut self) -> usize {
        self.content().tasks.value().map_or(0, |tasks| tasks.len())
    }

    #[cfg(test)]
    fn ordered_ptr(&mut self) -> Option<*const Task> {
        self.content().tasks.value().map(|tasks| tasks.as_ptr())
    }
}

/// The board detail screen.
#[derive(Debug)]
pub struct BoardPageView {
    board: Option<Query<Board>>,
    source: Option<Arc<Board>>,
    columns: Vec<ColumnView>,
}

impl BoardPageView {
    /// Opens the view for `board_id`.
    ///
    /// Without an id, no request is issued and the view reports the missing
    /// parameter.
    #[must_use]
    pub fn new(client: &ApiClient, board_id: Option<&str>) -> Self {
        let board = board_id
            .filter(|id| !id.is_empty())
            .map(|id| client.get_board_by_id(id));
        Self {
            board,
            source: None,
            columns: Vec::new(),
        }
    }

    /// Returns the current state of the board query.
    #[must_use]
    pub fn state(&self) -> SharedState<Board> {
        match &self.board {
            Some(query) => query.state(),
            None => QueryState::Failed(ErrorInfo::missing_parameter("boardId")),
        }
    }

    /// Brings the column views in line with the loaded board.
    ///
    /// Columns are matched by id, so a column that survives a reload keeps
    /// its memoized ordering.
    pub fn sync(&mut self, client: &ApiClient) {
        let QueryState::Success(board) = self.state() else {
            return;
        };
        if self
            .source
            .as_ref()
            .is_some_and(|source| Arc::ptr_eq(source, &board))
        {
            return;
        }

        let mut previous = std::mem::take(&mut self.columns);
        self.columns = board
            .columns
            .iter()
            .map(|column| {
                match previous.iter().position(|view| view.id == column.id) {
                    Some(idx) => {
                        let mut view = previous.swap_remove(idx);
                        column.name.clone_into(&mut view.name);
                        view
                    }
                    None => ColumnView::new(client, column),
                }
            })
            .collect();
        debug!(board = %board.id, columns = self.columns.len(), "board columns synced");
        self.source = Some(board);
    }

    /// Returns the column views, in board order.
    pub fn columns_mut(&mut self) -> &mut [ColumnView] {
        &mut self.columns
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Re-issues the board query and the shared tasks query.
    pub fn refresh(&mut self, client: &ApiClient) {
        if let Some(query) = &self.board {
            let id = query.key().params().first().cloned().unwrap_or_default();
            self.board = Some(client.refetch_board(&id));
        }
        if !self.columns.is_empty() {
            // Columns observe the shared slot, so one refetch reaches all.
            let _ = client.refetch_tasks();
        }
    }
}
