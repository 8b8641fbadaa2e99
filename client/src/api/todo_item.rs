//! Todo item endpoints.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{ApiResult, CreatedTodoItem, NewTodoItem, TodoItem, TodoItemList, TodoName};
use crate::request::AuthClient;

/// Client for the `/todo/{name}/item` resource family.
#[derive(Clone)]
pub struct TodoItemApi {
    client: Arc<AuthClient>,
}

impl TodoItemApi {
    /// Build an API client over the shared request pipeline.
    pub fn new(client: Arc<AuthClient>) -> Self {
        Self { client }
    }

    /// `POST /todo/{name}/item`; returns the abbreviated created record.
    pub async fn create(&self, name: &TodoName, item: &NewTodoItem) -> ApiResult<CreatedTodoItem> {
        self.client
            .post_json(&format!("/todo/{name}/item"), item)
            .await
    }

    /// `GET /todo/{name}/item`.
    pub async fn list(&self, name: &TodoName) -> ApiResult<TodoItemList> {
        self.client.get_json(&format!("/todo/{name}/item")).await
    }

    /// `POST /todo/{name}/item/{id}/complete`; no body, returns the updated
    /// item with `complete_time` set.
    pub async fn complete(&self, name: &TodoName, item_id: Uuid) -> ApiResult<TodoItem> {
        self.client
            .post_empty_json(&format!("/todo/{name}/item/{item_id}/complete"))
            .await
    }
}
