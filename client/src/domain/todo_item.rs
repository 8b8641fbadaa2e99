//! Todo item records.
//!
//! Completion is a one-way transition: once the server confirms an item as
//! complete the client never un-completes it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A todo item as returned by the item list and completion endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Server-assigned identifier.
    pub todo_item_id: Uuid,
    /// Item text.
    pub title: String,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Whether the server has confirmed completion.
    pub is_complete: bool,
    /// Set by the server when the item was completed.
    #[serde(default)]
    pub complete_time: Option<DateTime<Utc>>,
    /// Server-assigned creation time.
    pub create_time: DateTime<Utc>,
    /// Server-assigned last update time.
    pub update_time: DateTime<Utc>,
}

/// The full item list response for one todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItemList {
    /// One row per item, in server order.
    pub items: Vec<TodoItem>,
}

/// The abbreviated record returned by item creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTodoItem {
    /// Server-assigned identifier.
    pub todo_item_id: Uuid,
    /// Item text, echoed back.
    pub title: String,
    /// Always false for a freshly created item.
    pub is_complete: bool,
}

/// Fields accepted when creating an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTodoItem {
    /// Item text; must not be blank.
    pub title: String,
    /// Optional due date; the server defaults to today when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    //! Wire-shape coverage for item records.
    use super::{NewTodoItem, TodoItem};
    use rstest::rstest;

    #[rstest]
    fn decodes_item_without_optional_fields() {
        let json = r#"{
            "todo_item_id": "0b8e4c2e-9f3c-4a39-a65a-5a2d9f8cb0d1",
            "title": "milk",
            "is_complete": false,
            "create_time": "2024-05-01T10:00:00Z",
            "update_time": "2024-05-01T10:00:00Z"
        }"#;
        let item: TodoItem = serde_json::from_str(json).expect("decode");
        assert_eq!(item.title, "milk");
        assert!(item.due_date.is_none());
        assert!(item.complete_time.is_none());
        assert!(!item.is_complete);
    }

    #[rstest]
    fn create_request_omits_absent_due_date() {
        let body = serde_json::to_value(NewTodoItem {
            title: "milk".to_owned(),
            due_date: None,
        })
        .expect("encode");
        assert_eq!(body, serde_json::json!({ "title": "milk" }));
    }
}
