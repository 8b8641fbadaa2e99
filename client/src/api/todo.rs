//! Todo list endpoints.

use std::sync::Arc;

use crate::domain::{ApiResult, NewTodo, Todo, TodoList, TodoName, UpdateTodo};
use crate::request::AuthClient;

/// Client for the `/todo` resource family.
///
/// Pure endpoint mapping: no retries, no caching, no validation beyond what
/// the domain types already enforce.
#[derive(Clone)]
pub struct TodoApi {
    client: Arc<AuthClient>,
}

impl TodoApi {
    /// Build an API client over the shared request pipeline.
    pub fn new(client: Arc<AuthClient>) -> Self {
        Self { client }
    }

    /// `POST /todo`; the success body is empty.
    pub async fn create(&self, todo: &NewTodo) -> ApiResult<()> {
        self.client.post_unit("/todo", todo).await
    }

    /// `GET /todo`.
    pub async fn list(&self) -> ApiResult<TodoList> {
        self.client.get_json("/todo").await
    }

    /// `GET /todo/{name}`.
    pub async fn get(&self, name: &TodoName) -> ApiResult<Todo> {
        self.client.get_json(&format!("/todo/{name}")).await
    }

    /// `PUT /todo/{name}`; the success body is empty.
    pub async fn update(&self, name: &TodoName, update: &UpdateTodo) -> ApiResult<()> {
        self.client.put_unit(&format!("/todo/{name}"), update).await
    }

    /// `DELETE /todo/{name}`.
    pub async fn delete(&self, name: &TodoName) -> ApiResult<()> {
        self.client.delete(&format!("/todo/{name}")).await
    }
}
