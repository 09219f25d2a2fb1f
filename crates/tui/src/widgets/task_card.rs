//! Task card rendering widget.
//!
//! This module provides the leaf rendering of one task: its title, its
//! description, and its raw deadline.

use kanban_protocol::Task;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Renders a task card to the buffer.
///
/// # Layout
///
/// ```text
/// ╭────────────────╮
/// │Title           │
/// │description...  │
/// │Deadline: 200   │
/// ╰────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use kanban_protocol::{Deadline, Task};
/// use kanban_tui::widgets::render_task_card;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let task = Task::new("t1", "c1", "Write spec", Deadline::from_millis(100));
/// let area = Rect::new(0, 0, 20, 5);
/// let mut buf = Buffer::empty(area);
///
/// render_task_card(&task, false, area, &mut buf);
/// ```
pub fn render_task_card(task: &Task, is_selected: bool, area: Rect, buf: &mut Buffer) {
    // Skip rendering if area is too small
    if area.width < 4 || area.height < 3 {
        return;
    }

    let (border_color, title_style, text_style) = if is_selected {
        (
            Color::Cyan,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White),
        )
    } else {
        (
            Color::DarkGray,
            Style::default().fg(Color::White),
            Style::default().fg(Color::Gray),
        )
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let content = vec![
        Line::from(Span::styled(
            truncate_string(&task.title, inner_width),
            title_style,
        )),
        Line::from(Span::styled(
            truncate_string(&task.description, inner_width),
            text_style,
        )),
        Line::from(Span::styled(
            truncate_string(&format!("Deadline: {}", task.deadline), inner_width),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color)),
        )
        .render(area, buf);
}

/// Truncates a string to fit within a given width, adding ellipsis if needed.
fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_width).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use kanban_protocol::Deadline;

    fn task() -> Task {
        Task::new("t2", "c1", "Review", Deadline::from_millis(200)).with_description("Review the draft")
    }

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello", 5), "Hello");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("Hello, World!", 10), "Hello, ...");
        assert_eq!(truncate_string("Hello", 3), "Hel");
    }

    #[test]
    fn card_shows_title_description_and_raw_deadline() {
        let area = Rect::new(0, 0, 24, 5);
        let mut buf = Buffer::empty(area);

        render_task_card(&task(), false, area, &mut buf);

        insta::assert_snapshot!(buffer_to_string(&buf).trim_end(), @r"
        ╭──────────────────────╮
        │Review                │
        │Review the draft      │
        │Deadline: 200         │
        ╰──────────────────────╯
        ");
    }

    #[test]
    fn selected_card_is_highlighted() {
        let area = Rect::new(0, 0, 24, 5);
        let mut buf = Buffer::empty(area);

        render_task_card(&task(), true, area, &mut buf);
        assert_eq!(buf[(0, 0)].fg, Color::Cyan);
    }

    #[test]
    fn render_task_card_handles_small_area() {
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);

        // Should not panic with tiny area
        render_task_card(&task(), false, area, &mut buf);
        assert_eq!(buffer_to_string(&buf).trim(), "");
    }
}
