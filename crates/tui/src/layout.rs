//! Centralized layout measurements for the TUI.
//!
//! This module defines shared constants for layout dimensions used across
//! multiple rendering components.

/// Height of the header bar in rows.
///
/// The header displays the application title and help cue.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 3;

/// Height of the board title line above the columns.
pub const BOARD_TITLE_HEIGHT: u16 = 1;

/// Height of each task card in rows.
///
/// This includes the border (2 rows) and content (3 rows: title,
/// description, and deadline).
pub const TASK_CARD_HEIGHT: u16 = 5;

/// Minimum terminal height for useful rendering (content area).
///
/// Below this height, we display a "terminal too small" message.
/// A board needs its title, the column borders, and one task card.
pub const MIN_HEIGHT: u16 = BOARD_TITLE_HEIGHT + 2 + TASK_CARD_HEIGHT;

/// Minimum terminal height for rendering with header and status bar.
///
/// Between `MIN_HEIGHT` and this value, both are hidden to reclaim space.
pub const MIN_HEIGHT_WITH_CHROME: u16 = MIN_HEIGHT + HEADER_HEIGHT + STATUS_BAR_HEIGHT;

/// Minimum terminal width for useful rendering.
pub const MIN_WIDTH: u16 = 40;
