//! Status bar rendering widget.
//!
//! This module provides the footer showing where the viewer is and the
//! keybindings that apply there.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::route::Route;

/// Renders the status bar for `route`.
///
/// # Layout
///
/// ```text
/// +-------------------------------------------------------------+
/// | /boards/b1  |  ←→↑↓ Navigate  Esc Back  r Refresh  ? Help   |
/// +-------------------------------------------------------------+
/// ```
///
/// # Examples
///
/// ```
/// use kanban_tui::Route;
/// use kanban_tui::widgets::render_status_bar;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let area = Rect::new(0, 0, 80, 3);
/// let mut buf = Buffer::empty(area);
///
/// render_status_bar(&Route::board("b1"), area, &mut buf);
/// ```
pub fn render_status_bar(route: &Route, area: Rect, buf: &mut Buffer) {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::White);
    let route_style = Style::default().fg(Color::Cyan);

    let mut spans = vec![
        Span::styled(route.path(), route_style),
        Span::styled("  |  ", text_style),
    ];
    match route {
        Route::BoardList => spans.extend([
            Span::styled("↑↓", key_style),
            Span::styled(" Select  ", text_style),
            Span::styled("Enter", key_style),
            Span::styled(" Open  ", text_style),
        ]),
        Route::BoardDetail { .. } => spans.extend([
            Span::styled("←→↑↓", key_style),
            Span::styled(" Navigate  ", text_style),
            Span::styled("Esc", key_style),
            Span::styled(" Back  ", text_style),
        ]),
    }
    spans.extend([
        Span::styled("r", key_style),
        Span::styled(" Refresh  ", text_style),
        Span::styled("?", key_style),
        Span::styled(" Help", text_style),
    ]);

    Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .render(area, buf);
}
