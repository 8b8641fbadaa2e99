//! Hierarchical cache keys with prefix-scoped invalidation.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::TodoName;

/// Ordered, non-empty list of scope segments identifying one cached query.
///
/// Keys form a hierarchy by prefix: `[todo, groceries]` is inside the scope
/// of `[todo]`, so invalidating `[todo]` touches both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

/// Validation errors returned when constructing [`QueryKey`] from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryKeyError {
    /// A key needs at least one segment.
    #[error("query key must not be empty")]
    Empty,
    /// Blank segments would collapse distinct scopes.
    #[error("query key segments must not be blank")]
    BlankSegment,
}

impl QueryKey {
    /// Construct a key from raw segments.
    pub fn new<I, S>(segments: I) -> Result<Self, QueryKeyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(QueryKeyError::Empty);
        }
        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(QueryKeyError::BlankSegment);
        }
        Ok(Self(segments))
    }

    /// The key for the todo list collection.
    pub fn todo_list() -> Self {
        Self(vec!["todo".to_owned()])
    }

    /// The key for one todo's detail record.
    pub fn todo(name: &TodoName) -> Self {
        Self(vec!["todo".to_owned(), name.as_str().to_owned()])
    }

    /// The key for one todo's item collection.
    pub fn todo_items(name: &TodoName) -> Self {
        Self(vec![
            "todo".to_owned(),
            name.as_str().to_owned(),
            "item".to_owned(),
        ])
    }

    /// The key for one todo's template collection.
    pub fn recurring_templates(name: &TodoName) -> Self {
        Self(vec![
            "recurring-templates".to_owned(),
            name.as_str().to_owned(),
        ])
    }

    /// The key for one template record.
    pub fn recurring_template(name: &TodoName, template_id: Uuid) -> Self {
        Self(vec![
            "recurring-template".to_owned(),
            name.as_str().to_owned(),
            template_id.to_string(),
        ])
    }

    /// Whether `prefix` is a (possibly equal) leading slice of this key.
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.len() >= prefix.0.len() && self.0.iter().zip(&prefix.0).all(|(a, b)| a == b)
    }

    /// Borrow the segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}
