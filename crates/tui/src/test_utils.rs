//! Helpers shared by the rendering tests.

use ratatui::buffer::Buffer;

/// Renders a buffer as text, one line per row, trailing blanks removed.
///
/// Wide and styled cells contribute their symbol only, so assertions and
/// inline snapshots compare exactly what a user would read.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let mut result = String::new();
    for y in buf.area.top()..buf.area.bottom() {
        let row: String = (buf.area.left()..buf.area.right())
            .filter_map(|x| buf.cell((x, y)))
            .map(|cell| cell.symbol())
            .collect();
        result.push_str(row.trim_end_matches(' '));
        result.push('\n');
    }
    result
}
