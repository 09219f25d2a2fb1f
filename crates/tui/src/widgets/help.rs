//! Help overlay listing the key bindings.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

use crate::event::{KEY_BINDINGS, KeyBinding};

const CLOSE_HINT: &str = "Press any key to close";

/// Renders the help overlay centered over `area`, one row per entry of
/// [`KEY_BINDINGS`].
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use kanban_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(area, &mut buf);
/// ```
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let key_width = KEY_BINDINGS
        .iter()
        .map(|binding| binding.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![Line::default()];
    lines.extend(KEY_BINDINGS.iter().map(|binding| binding_line(binding, key_width)));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("  {CLOSE_HINT}"),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    // Borders add two in each direction.
    let width = lines.iter().map(Line::width).max().unwrap_or(0) + 4;
    let height = lines.len() + 2;
    let popup = centered(
        u16::try_from(width).unwrap_or(u16::MAX),
        u16::try_from(height).unwrap_or(u16::MAX),
        area,
    );

    let accent = Style::default().fg(Color::LightYellow);
    let block = Block::bordered()
        .title(Span::styled(" Help ", accent.add_modifier(Modifier::BOLD)))
        .border_type(BorderType::Rounded)
        .border_style(accent);

    Clear.render(popup, buf);
    Paragraph::new(lines).block(block).render(popup, buf);
}

fn binding_line(binding: &KeyBinding, key_width: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<key_width$}  ", binding.label),
            Style::default().fg(Color::Green),
        ),
        Span::styled(binding.description, Style::default().fg(Color::White)),
    ])
}

/// Centers a `width` x `height` rectangle in `area`, shrinking it to fit.
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}
