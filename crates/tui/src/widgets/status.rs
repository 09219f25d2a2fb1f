//! Query status rendering.
//!
//! Every view that shows queried data renders through [`render_outcome`]:
//! the loading indicator or the error text takes the place of the content
//! until the query succeeds.

use kanban_protocol::Outcome;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

/// Renders `outcome` into `area`.
///
/// Loading and failure render their message; a ready outcome hands its
/// content to `content` unmodified.
///
/// # Examples
///
/// ```
/// use kanban_protocol::{ErrorInfo, QueryState};
/// use kanban_tui::widgets::render_outcome;
/// use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};
///
/// let area = Rect::new(0, 0, 30, 1);
/// let mut buf = Buffer::empty(area);
///
/// let state: QueryState<&str> = QueryState::Failed(ErrorInfo::client("network down"));
/// render_outcome(state.project(), area, &mut buf, |text, area, buf| {
///     Line::from(*text).render(area, buf);
/// });
/// ```
pub fn render_outcome<C>(
    outcome: Outcome<C>,
    area: Rect,
    buf: &mut Buffer,
    content: impl FnOnce(C, Rect, &mut Buffer),
) {
    match outcome {
        Outcome::Ready(value) => content(value, area, buf),
        other => {
            let is_error = matches!(other, Outcome::Failed(_));
            if let Some(message) = other.message() {
                render_status_message(message, is_error, area, buf);
            }
        }
    }
}

/// Renders a status message: dim italic while loading, red for errors.
pub fn render_status_message(message: &str, is_error: bool, area: Rect, buf: &mut Buffer) {
    let style = if is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    };

    Paragraph::new(Line::from(Span::styled(message, style)))
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
