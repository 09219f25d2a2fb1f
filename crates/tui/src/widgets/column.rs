//! Column rendering widget.
//!
//! A column shows its name and, below it, either the status of the shared
//! tasks query or the column's tasks as a vertical list of cards.

use kanban_protocol::Task;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::status::render_outcome;
use super::task_card::render_task_card;
use crate::layout::TASK_CARD_HEIGHT;
use crate::views::ColumnContent;

/// Position of a column in the horizontal layout.
///
/// Adjacent columns share a border; the position decides which corners and
/// connectors a column draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPosition {
    /// The only column: a full rounded box.
    Only,
    /// Leftmost of several: rounded on the left, no right border.
    First,
    /// Between others: T-connectors on the left, no right border.
    Middle,
    /// Rightmost of several: T-connectors on the left, rounded on the right.
    Last,
}

impl ColumnPosition {
    /// Returns the position of column `index` among `count` columns.
    #[must_use]
    pub fn of(index: usize, count: usize) -> Self {
        match (index, count) {
            (_, 0 | 1) => Self::Only,
            (0, _) => Self::First,
            (i, n) if i + 1 >= n => Self::Last,
            _ => Self::Middle,
        }
    }

    fn borders(self) -> Borders {
        match self {
            Self::Only | Self::Last => Borders::ALL,
            Self::First | Self::Middle => Borders::TOP | Borders::BOTTOM | Borders::LEFT,
        }
    }
}

const BORDER_SET_FIRST: border::Set = border::Set {
    top_left: "╭",
    top_right: "─",
    bottom_left: "╰",
    bottom_right: "─",
    vertical_left: "│",
    vertical_right: " ",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

const BORDER_SET_MIDDLE: border::Set = border::Set {
    top_left: "┬",
    top_right: "─",
    bottom_left: "┴",
    bottom_right: "─",
    vertical_left: "│",
    vertical_right: " ",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

const BORDER_SET_LAST: border::Set = border::Set {
    top_left: "┬",
    top_right: "╮",
    bottom_left: "┴",
    bottom_right: "╯",
    vertical_left: "│",
    vertical_right: "│",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// Renders one column to the buffer.
///
/// The title shows the column name, followed by the task count once the
/// tasks are loaded. The body shows the tasks query status until it
/// succeeds, then one card per task in the given order.
///
/// # Layout
///
/// ```text
/// ╭─Todo (2)──────────
/// │╭────────────────╮
/// ││Review          │
/// ││Review the draft│
/// ││Deadline: 200   │
/// │╰────────────────╯
/// ╰───────────────────
/// ```
pub fn render_column(
    content: &ColumnContent<'_>,
    is_focused: bool,
    selected_idx: Option<usize>,
    area: Rect,
    buf: &mut Buffer,
    position: ColumnPosition,
) {
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if is_focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let title = match content.tasks.value() {
        Some(tasks) => format!("{} ({})", content.name, tasks.len()),
        None => content.name.to_string(),
    };

    let border_set = match position {
        ColumnPosition::Only => border::ROUNDED,
        ColumnPosition::First => BORDER_SET_FIRST,
        ColumnPosition::Middle => BORDER_SET_MIDDLE,
        ColumnPosition::Last => BORDER_SET_LAST,
    };

    let block = Block::default()
        .title(Span::styled(title, title_style))
        .borders(position.borders())
        .border_set(border_set)
        .border_style(border_style);

    let inner_area = block.inner(area);
    block.render(area, buf);

    render_outcome(content.tasks.project(), inner_area, buf, |tasks, area, buf| {
        render_task_list(tasks, is_focused, selected_idx, area, buf);
    });
}

fn render_task_list(
    tasks: &[Task],
    is_focused: bool,
    selected_idx: Option<usize>,
    area: Rect,
    buf: &mut Buffer,
) {
    if tasks.is_empty() {
        render_empty_placeholder(area, buf);
        return;
    }

    let visible_tasks = (area.height / TASK_CARD_HEIGHT).max(1) as usize;
    let scroll_offset = calculate_scroll_offset(selected_idx, tasks.len(), visible_tasks);

    let shown = &tasks[scroll_offset..tasks.len().min(scroll_offset + visible_tasks)];
    let mut constraints: Vec<Constraint> = shown
        .iter()
        .map(|_| Constraint::Length(TASK_CARD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));

    let task_areas = Layout::vertical(constraints).split(area);

    for (i, (task, task_area)) in shown.iter().zip(task_areas.iter()).enumerate() {
        let is_selected = is_focused && selected_idx == Some(scroll_offset + i);
        render_task_card(task, is_selected, *task_area, buf);
    }
}

/// Renders a placeholder message for empty columns.
fn render_empty_placeholder(area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(Span::styled(
        "No tasks",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .render(area, buf);
}

/// Calculates the scroll offset to keep the selected task visible.
fn calculate_scroll_offset(
    selected_idx: Option<usize>,
    total_tasks: usize,
    visible_tasks: usize,
) -> usize {
    let Some(selected) = selected_idx else {
        return 0;
    };

    if total_tasks <= visible_tasks {
        return 0;
    }

    let max_offset = total_tasks.saturating_sub(visible_tasks);

    if selected < visible_tasks / 2 {
        0
    } else {
        (selected.saturating_sub(visible_tasks / 2)).min(max_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use kanban_protocol::{ErrorInfo, QueryState, ordered, sample};

    fn render(content: &ColumnContent<'_>, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        render_column(content, false, None, area, &mut buf, ColumnPosition::Only);
        buffer_to_string(&buf)
    }

    #[test]
    fn positions() {
        assert_eq!(ColumnPosition::of(0, 1), ColumnPosition::Only);
        assert_eq!(ColumnPosition::of(0, 3), ColumnPosition::First);
        assert_eq!(ColumnPosition::of(1, 3), ColumnPosition::Middle);
        assert_eq!(ColumnPosition::of(2, 3), ColumnPosition::Last);
    }

    #[test]
    fn pending_tasks_show_loading_under_the_name() {
        let content = ColumnContent {
            name: "Todo",
            tasks: QueryState::Pending,
        };
        let output = render(&content, 24, 8);

        assert!(output.contains("Todo"));
        assert!(output.contains("Loading..."));
        assert!(!output.contains("Todo ("));
    }

    #[test]
    fn failed_tasks_show_error_under_the_name() {
        let content = ColumnContent {
            name: "Todo",
            tasks: QueryState::Failed(ErrorInfo::http_error(500, "boom")),
        };
        let output = render(&content, 30, 8);

        assert!(output.contains("Todo"));
        assert!(output.contains("Error 500: boom"));
    }

    #[test]
    fn empty_column_shows_placeholder() {
        let content = ColumnContent {
            name: "Done",
            tasks: QueryState::Success(&[] as &[Task]),
        };
        let output = render(&content, 24, 8);

        assert!(output.contains("Done (0)"));
        assert!(output.contains("No tasks"));
    }

    #[test]
    fn tasks_render_in_given_order() {
        let tasks = ordered(&sample::sprint_tasks(), "c1");
        let content = ColumnContent {
            name: "Todo",
            tasks: QueryState::Success(tasks.as_slice()),
        };
        let output = render(&content, 26, 14);

        let review = output.find("Review").expect("Review rendered");
        let write = output.find("Write spec").expect("Write spec rendered");
        assert!(review < write);
        assert!(output.contains("Todo (2)"));
    }

    #[test]
    fn scroll_offset_no_selection() {
        assert_eq!(calculate_scroll_offset(None, 10, 3), 0);
    }

    #[test]
    fn scroll_offset_all_visible() {
        assert_eq!(calculate_scroll_offset(Some(2), 3, 5), 0);
    }

    #[test]
    fn scroll_offset_keeps_selection_visible() {
        for selected in 0..10 {
            let offset = calculate_scroll_offset(Some(selected), 10, 3);
            assert!(offset <= selected && selected < offset + 3, "{selected}");
        }
    }
}
