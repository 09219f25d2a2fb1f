//! Navigation targets.
//!
//! The viewer has two screens, addressed by web-style paths:
//!
//! | Path | Screen |
//! |------|--------|
//! | `/` | Board list |
//! | `/boards/{id}` | Board detail |

use std::fmt;

/// A screen the application can show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// All boards, one link per board.
    #[default]
    BoardList,
    /// One board with its columns.
    ///
    /// `board_id` is `None` when the path names no board (`/boards/`); the
    /// screen then reports the missing parameter instead of loading.
    BoardDetail {
        /// Identifier of the board to show.
        board_id: Option<String>,
    },
}

impl Route {
    /// Route to the detail screen of board `id`.
    #[must_use]
    pub fn board(id: impl Into<String>) -> Self {
        Self::BoardDetail {
            board_id: Some(id.into()),
        }
    }

    /// Parses a path.
    ///
    /// Unknown paths fall back to the board list.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_tui::Route;
    ///
    /// assert_eq!(Route::parse("/"), Route::BoardList);
    /// assert_eq!(Route::parse("/boards/b1"), Route::board("b1"));
    /// assert_eq!(Route::parse("/boards/"), Route::BoardDetail { board_id: None });
    /// assert_eq!(Route::parse("/nowhere"), Route::BoardList);
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            ["boards"] => Self::BoardDetail { board_id: None },
            ["boards", id] => Self::board(*id),
            _ => Self::BoardList,
        }
    }

    /// Returns the path of this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::BoardList => "/".to_string(),
            Self::BoardDetail { board_id } => {
                format!("/boards/{}", board_id.as_deref().unwrap_or_default())
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
