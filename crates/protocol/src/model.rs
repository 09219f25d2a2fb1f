//! Board, column, and task types as served by the board API.
//!
//! These types mirror the JSON bodies of `GET /boards`, `GET /boards/{id}`
//! and `GET /tasks`. Field names follow the API's camelCase convention on
//! the wire.

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ProtocolError, Result};

/// A Kanban board with its ordered list of columns.
///
/// # Examples
///
/// ```
/// use kanban_protocol::Board;
///
/// let json = r#"{"id":"b1","name":"Sprint","columns":[{"id":"c1","name":"Todo","tasks":[]}]}"#;
/// let board: Board = serde_json::from_str(json).unwrap();
/// assert_eq!(board.columns[0].name, "Todo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Unique identifier of the board.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Columns in display order.
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    /// Returns the column with the given id, if the board has one.
    #[must_use]
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }
}

/// A column of a board.
///
/// The `tasks` list is carried as received. Which tasks a column renders is
/// decided by [`Task::column_id`], not by this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Identifier, unique within its board.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Task ids as listed by the API.
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// A task, fetched as part of a flat list independent of boards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier of the task.
    pub id: String,
    /// Id of the column this task belongs to.
    pub column_id: String,
    /// Short summary.
    pub title: String,
    /// Longer free-form text.
    #[serde(default)]
    pub description: String,
    /// When the task is due.
    pub deadline: Deadline,
}

impl Task {
    /// Creates a task with an empty description.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_protocol::{Deadline, Task};
    ///
    /// let task = Task::new("t1", "c1", "Write spec", Deadline::from_millis(100));
    /// assert_eq!(task.column_id, "c1");
    /// assert!(task.description.is_empty());
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        column_id: impl Into<String>,
        title: impl Into<String>,
        deadline: Deadline,
    ) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            title: title.into(),
            description: String::new(),
            deadline,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A task deadline as milliseconds since the Unix epoch.
///
/// On the wire a deadline is either a JSON number of epoch milliseconds or an
/// RFC 3339 string. It always serializes back as a number, and its
/// [`Display`](fmt::Display) form is that raw number.
///
/// # Examples
///
/// ```
/// use kanban_protocol::Deadline;
///
/// let a: Deadline = serde_json::from_str("200").unwrap();
/// let b: Deadline = serde_json::from_str(r#""1970-01-01T00:00:00.100Z""#).unwrap();
/// assert!(a > b);
/// assert_eq!(b.to_string(), "100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Deadline(i64);

impl Deadline {
    /// Creates a deadline from epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the deadline as epoch milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Deadline {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(millis) = trimmed.parse::<i64>() {
            return Ok(Self(millis));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Self(dt.timestamp_millis()))
            .map_err(|e| ProtocolError::InvalidDeadline {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DeadlineVisitor)
    }
}

struct DeadlineVisitor;

impl Visitor<'_> for DeadlineVisitor {
    type Value = Deadline;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("epoch milliseconds or an RFC 3339 timestamp")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Deadline, E> {
        Ok(Deadline(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Deadline, E> {
        i64::try_from(v)
            .map(Deadline)
            .map_err(|_| E::custom(format!("deadline {v} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Deadline, E> {
        if v.is_finite() {
            Ok(Deadline(v.round() as i64))
        } else {
            Err(E::custom("deadline is not a finite number"))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Deadline, E> {
        v.parse().map_err(E::custom)
    }
}

/// Decodes a JSON body into a protocol type.
///
/// # Errors
///
/// Returns [`ProtocolError::DeserializationFailed`] if the bytes are not
/// valid JSON of the expected shape.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(ProtocolError::DeserializationFailed)
}
