//! Query lifecycle and status projection.
//!
//! A [`QueryState`] tracks one network read: it is pending until the request
//! resolves, then holds either the decoded value or an [`ErrorInfo`]. The
//! status projection turns that state into exactly one renderable
//! [`Outcome`].
//!
//! # Examples
//!
//! ```
//! use kanban_protocol::{ErrorInfo, Outcome, QueryState};
//!
//! let state: QueryState<Vec<String>> = QueryState::Failed(ErrorInfo::client("network down"));
//! assert_eq!(state.project(), Outcome::Failed("Error: network down".to_string()));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message shown for HTTP errors that carry no usable text.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Message shown while a query is pending.
pub const LOADING: &str = "Loading...";

/// Why a query failed.
///
/// The two shapes are discriminated by the presence of an HTTP status. On the
/// wire (and in fixtures) the enum is untagged, so `{"status":404,"data":null}`
/// and `{"message":"network down"}` both decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorInfo {
    /// A response was received with a non-success status, or its body could
    /// not be decoded.
    Http {
        /// The HTTP status code.
        status: u16,
        /// Error text produced on our side, e.g. a decode failure.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        /// The response body, `Null` when absent or not JSON.
        #[serde(default)]
        data: Value,
    },
    /// The request never produced a response: transport failure or an
    /// invalid request such as a missing parameter.
    Client {
        /// Human-readable description.
        message: String,
    },
}

impl ErrorInfo {
    /// Creates an HTTP error carrying a response body.
    #[must_use]
    pub fn http(status: u16, data: Value) -> Self {
        Self::Http {
            status,
            error: None,
            data,
        }
    }

    /// Creates an HTTP error carrying our own error text.
    #[must_use]
    pub fn http_error(status: u16, error: impl Into<String>) -> Self {
        Self::Http {
            status,
            error: Some(error.into()),
            data: Value::Null,
        }
    }

    /// Creates an error for a request that never got a response.
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    /// Creates the error reported when a required route parameter is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_protocol::ErrorInfo;
    ///
    /// let err = ErrorInfo::missing_parameter("boardId");
    /// assert_eq!(err.display_message(), "Error: missing required parameter: boardId");
    /// ```
    #[must_use]
    pub fn missing_parameter(name: &str) -> Self {
        Self::client(format!("missing required parameter: {name}"))
    }

    /// Returns the HTTP status, if the error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Client { .. } => None,
        }
    }

    /// Renders the error as shown to the user.
    ///
    /// - With a status: `Error {status}: {text}`, where `text` is the error
    ///   string if set, otherwise the body. A string body is used verbatim,
    ///   an object body contributes its `message` field, anything else is
    ///   shown as JSON. A body rendering to `null` becomes
    ///   [`UNKNOWN_ERROR`].
    /// - Without a status: `Error: {message}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_protocol::ErrorInfo;
    ///
    /// let err = ErrorInfo::http(404, serde_json::Value::Null);
    /// assert_eq!(err.display_message(), "Error 404: Unknown Error");
    ///
    /// let err = ErrorInfo::http_error(500, "boom");
    /// assert_eq!(err.display_message(), "Error 500: boom");
    /// ```
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Http {
                status,
                error,
                data,
            } => {
                let text = match error {
                    Some(error) => error.clone(),
                    None => body_text(data),
                };
                if text == "null" {
                    format!("Error {status}: {UNKNOWN_ERROR}")
                } else {
                    format!("Error {status}: {text}")
                }
            }
            Self::Client { message } => format!("Error: {message}"),
        }
    }
}

/// Extracts display text from an error body.
fn body_text(data: &Value) -> String {
    match data {
        Value::String(text) => text.clone(),
        Value::Object(fields) => match fields.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => data.to_string(),
        },
        _ => data.to_string(),
    }
}

/// The lifecycle of one query.
///
/// Exactly one variant holds at any time, so the three lifecycle flags
/// derived from it are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState<T> {
    /// The request has been issued and has not resolved yet.
    #[default]
    Pending,
    /// The request resolved with a decoded value.
    Success(T),
    /// The request failed.
    Failed(ErrorInfo),
}

impl<T> QueryState<T> {
    /// Returns `true` while the request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` once the request resolved with a value.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` once the request failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the three lifecycle flags.
    #[must_use]
    pub const fn flags(&self) -> LifecycleFlags {
        LifecycleFlags {
            is_loading: self.is_loading(),
            is_success: self.is_success(),
            is_error: self.is_error(),
        }
    }

    /// Returns the resolved value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Borrows the value inside the state.
    #[must_use]
    pub fn as_ref(&self) -> QueryState<&T> {
        match self {
            Self::Pending => QueryState::Pending,
            Self::Success(value) => QueryState::Success(value),
            Self::Failed(error) => QueryState::Failed(error.clone()),
        }
    }

    /// Maps the success value, keeping the lifecycle.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        match self {
            Self::Pending => QueryState::Pending,
            Self::Success(value) => QueryState::Success(f(value)),
            Self::Failed(error) => QueryState::Failed(error),
        }
    }

    /// Selects what to render for this state.
    ///
    /// Loading takes precedence, then failure, then the value.
    #[must_use]
    pub fn project(&self) -> Outcome<&T> {
        match self {
            Self::Pending => Outcome::Loading,
            Self::Failed(error) => Outcome::Failed(error.display_message()),
            Self::Success(value) => Outcome::Ready(value),
        }
    }
}

/// The lifecycle of a query as three booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifecycleFlags {
    /// The request is in flight.
    pub is_loading: bool,
    /// The request resolved with a value.
    pub is_success: bool,
    /// The request failed.
    pub is_error: bool,
}

/// The single renderable result of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<C> {
    /// Render the loading indicator.
    Loading,
    /// Render this error message in place of the content.
    Failed(String),
    /// Render the content unmodified.
    Ready(C),
}

impl<C> Outcome<C> {
    /// Projects loose lifecycle flags, as produced by callers that track
    /// them separately.
    ///
    /// Returns `None` when no flag holds, or when the error flag is set
    /// without error details; nothing is rendered in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_protocol::{LifecycleFlags, Outcome};
    ///
    /// let flags = LifecycleFlags { is_loading: true, is_success: true, is_error: true };
    /// assert_eq!(Outcome::from_flags(flags, None, "content"), Some(Outcome::Loading));
    ///
    /// let none = LifecycleFlags::default();
    /// assert_eq!(Outcome::from_flags(none, None, "content"), None);
    /// ```
    pub fn from_flags(flags: LifecycleFlags, error: Option<&ErrorInfo>, content: C) -> Option<Self> {
        if flags.is_loading {
            return Some(Self::Loading);
        }
        if flags.is_error
            && let Some(error) = error
        {
            return Some(Self::Failed(error.display_message()));
        }
        if flags.is_success {
            return Some(Self::Ready(content));
        }
        None
    }

    /// Returns the message to render for non-ready outcomes.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Loading => Some(LOADING),
            Self::Failed(message) => Some(message),
            Self::Ready(_) => None,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_error() -> impl Strategy<Value = ErrorInfo> {
        prop_oneof![
            (100u16..600, proptest::option::of("[a-z ]{0,20}"))
                .prop_map(|(status, error)| ErrorInfo::Http {
                    status,
                    error,
                    data: Value::Null,
                }),
            "[a-z ]{1,20}".prop_map(ErrorInfo::client),
        ]
    }

    fn arb_state() -> impl Strategy<Value = QueryState<u32>> {
        prop_oneof![
            Just(QueryState::Pending),
            any::<u32>().prop_map(QueryState::Success),
            arb_error().prop_map(QueryState::Failed),
        ]
    }

    proptest! {
        /// Exactly one lifecycle flag holds for every state.
        #[test]
        fn exactly_one_flag_holds(state in arb_state()) {
            let flags = state.flags();
            let set = [flags.is_loading, flags.is_success, flags.is_error]
                .into_iter()
                .filter(|f| *f)
                .count();
            prop_assert_eq!(set, 1);
        }

        /// The flag projection agrees with the enum projection.
        #[test]
        fn flag_projection_matches_enum(state in arb_state()) {
            let by_enum = state.project().map_ready(|v| *v);
            let by_flags = Outcome::from_flags(
                state.flags(),
                state.error(),
                state.value().copied().unwrap_or_default(),
            );
            prop_assert_eq!(Some(by_enum), by_flags);
        }

        /// HTTP errors always mention their status.
        #[test]
        fn http_messages_carry_status(err in arb_error()) {
            let message = err.display_message();
            match err.status() {
                Some(status) => {
                    let prefix = format!("Error {status}: ");
                    prop_assert!(message.starts_with(&prefix));
                }
                None => prop_assert!(message.starts_with("Error: ")),
            }
        }
    }

    impl<C> Outcome<C> {
        fn map_ready<D>(self, f: impl FnOnce(C) -> D) -> Outcome<D> {
            match self {
                Outcome::Loading => Outcome::Loading,
                Outcome::Failed(message) => Outcome::Failed(message),
                Outcome::Ready(content) => Outcome::Ready(f(content)),
            }
        }
    }
}
