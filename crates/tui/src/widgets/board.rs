//! Board rendering widget.
//!
//! This module renders a loaded board: its name on the first line, then its
//! columns side by side with equal widths.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::column::{ColumnPosition, render_column};
use crate::layout::BOARD_TITLE_HEIGHT;
use crate::views::ColumnContent;

/// Renders a board to the buffer.
///
/// Columns keep the order they have on the board. Only the focused column
/// shows the task selection.
///
/// # Arguments
///
/// * `name` - The board name, shown above the columns
/// * `columns` - Content of each column, in board order
/// * `selected_column` - Index of the focused column
/// * `selected_task` - Index of the selected task within the focused column
/// * `area` - The rectangular area to render into
/// * `buf` - The buffer to render into
///
/// # Layout
///
/// ```text
/// Release 1.0
/// ╭─To Do (2)────┬─In Progress (1)─┬─Done (1)───╮
/// │ ...          │ ...             │ ...        │
/// ╰──────────────┴─────────────────┴────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use kanban_protocol::{ordered, sample, QueryState};
/// use kanban_tui::views::ColumnContent;
/// use kanban_tui::widgets::render_board;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let tasks = ordered(&sample::sprint_tasks(), "c1");
/// let columns = [ColumnContent {
///     name: "Todo",
///     tasks: QueryState::Success(tasks.as_slice()),
/// }];
///
/// let area = Rect::new(0, 0, 60, 20);
/// let mut buf = Buffer::empty(area);
/// render_board("Sprint", &columns, 0, None, area, &mut buf);
/// ```
pub fn render_board(
    name: &str,
    columns: &[ColumnContent<'_>],
    selected_column: usize,
    selected_task: Option<usize>,
    area: Rect,
    buf: &mut Buffer,
) {
    let [title_area, columns_area] =
        Layout::vertical([Constraint::Length(BOARD_TITLE_HEIGHT), Constraint::Min(0)]).areas(area);

    Line::from(Span::styled(
        name.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
    .render(title_area, buf);

    if columns.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "No columns",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .render(columns_area, buf);
        return;
    }

    let count = columns.len();
    let column_areas = Layout::horizontal(
        (0..count).map(|_| Constraint::Ratio(1, count as u32)),
    )
    .split(columns_area);

    for (i, (content, column_area)) in columns.iter().zip(column_areas.iter()).enumerate() {
        let is_focused = selected_column == i;
        let task_selection = if is_focused { selected_task } else { None };
        render_column(
            content,
            is_focused,
            task_selection,
            *column_area,
            buf,
            ColumnPosition::of(i, count),
        );
    }
}
