//! Todo list aggregate and its validated name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validated todo list name.
///
/// The name doubles as the routing key and as a URL path segment, so it must
/// be non-empty, free of surrounding whitespace, and free of `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoName(String);

/// Validation errors returned when constructing [`TodoName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoNameError {
    /// Name is empty after trimming whitespace.
    #[error("todo name must not be empty")]
    Empty,
    /// Name carries leading or trailing whitespace.
    #[error("todo name must not contain surrounding whitespace")]
    SurroundingWhitespace,
    /// Name contains a path separator.
    #[error("todo name must not contain '/'")]
    ContainsSlash,
}

impl TodoName {
    /// Construct a name after validating it is a usable path segment.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoNameError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TodoNameError::Empty);
        }
        if raw.trim() != raw {
            return Err(TodoNameError::SurroundingWhitespace);
        }
        if raw.contains('/') {
            return Err(TodoNameError::ContainsSlash);
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for TodoName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for TodoName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for TodoName {
    type Error = TodoNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoName> for String {
    fn from(value: TodoName) -> Self {
        value.0
    }
}

/// Who can see a todo list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Anyone can read the list.
    Public,
    /// Only the owner can read the list.
    Private,
}

/// A todo list as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique name, also the routing key.
    pub name: TodoName,
    /// Server-assigned creation time.
    pub create_time: DateTime<Utc>,
    /// Server-assigned last update time.
    pub update_time: DateTime<Utc>,
}

/// A todo list row as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoSummary {
    /// Unique name, also the routing key.
    pub name: TodoName,
    /// Visibility of the list.
    pub visibility: Visibility,
    /// Server-assigned creation time.
    pub create_time: DateTime<Utc>,
    /// Server-assigned last update time.
    pub update_time: DateTime<Utc>,
}

/// The full list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// One row per todo list.
    pub items: Vec<TodoSummary>,
}

/// Fields accepted when creating a todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTodo {
    /// Unique name of the new list.
    pub name: TodoName,
    /// Visibility of the new list.
    pub visibility: Visibility,
}

/// Fields accepted when updating a todo list; the update is a rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateTodo {
    /// Replacement name.
    pub name: TodoName,
}

#[cfg(test)]
mod tests {
    //! Name validation and serde contract coverage.
    use super::{TodoName, TodoNameError, Visibility};
    use rstest::rstest;

    #[rstest]
    #[case("", TodoNameError::Empty)]
    #[case("   ", TodoNameError::Empty)]
    #[case(" groceries", TodoNameError::SurroundingWhitespace)]
    #[case("groceries ", TodoNameError::SurroundingWhitespace)]
    #[case("a/b", TodoNameError::ContainsSlash)]
    fn rejects_unusable_names(#[case] raw: &str, #[case] expected: TodoNameError) {
        let err = TodoName::new(raw).expect_err("name should be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn accepts_clean_names() {
        let name = TodoName::new("groceries").expect("valid name");
        assert_eq!(name.as_str(), "groceries");
        assert_eq!(name.to_string(), "groceries");
    }

    #[rstest]
    fn visibility_serialises_lowercase() {
        let json = serde_json::to_string(&Visibility::Public).expect("serialise");
        assert_eq!(json, "\"public\"");
        let back: Visibility = serde_json::from_str("\"private\"").expect("deserialise");
        assert_eq!(back, Visibility::Private);
    }
}
