//! Board list rendering widget.

use kanban_protocol::Board;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Renders one line per board, each a link to the board's page.
///
/// The highlighted board is drawn in cyan with a marker; the others show
/// their name and the number of columns they have.
///
/// # Layout
///
/// ```text
/// > Sprint        1 column
///   Release 1.0   3 columns
/// ```
pub fn render_board_list(boards: &[Board], selected: usize, area: Rect, buf: &mut Buffer) {
    if boards.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "No boards",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .render(area, buf);
        return;
    }

    let name_width = boards
        .iter()
        .map(|board| board.name.chars().count())
        .max()
        .unwrap_or(0);

    // Keep the highlighted board on screen.
    let visible = usize::from(area.height).max(1);
    let offset = selected.saturating_sub(visible - 1);

    let lines: Vec<Line<'_>> = boards
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, board)| board_line(board, i == selected, name_width))
        .collect();

    Paragraph::new(lines).render(area, buf);
}

fn board_line(board: &Board, is_selected: bool, name_width: usize) -> Line<'_> {
    let (marker, name_style) = if is_selected {
        (
            "> ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
    } else {
        ("  ", Style::default().fg(Color::White))
    };

    let columns = match board.columns.len() {
        1 => "1 column".to_string(),
        n => format!("{n} columns"),
    };

    Line::from(vec![
        Span::styled(marker, name_style),
        Span::styled(format!("{:<name_width$}", board.name), name_style),
        Span::styled(format!("   {columns}"), Style::default().fg(Color::DarkGray)),
    ])
}
