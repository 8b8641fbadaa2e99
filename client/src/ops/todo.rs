//! Todo list operations: cached reads and invalidating mutations.

use std::sync::Arc;

use crate::api::TodoApi;
use crate::cache::{QueryCache, QueryKey};
use crate::domain::{ApiResult, NewTodo, Todo, TodoList, TodoName, UpdateTodo};

/// Cached operations over the todo list resource.
#[derive(Clone)]
pub struct TodoOps {
    api: TodoApi,
    cache: Arc<QueryCache>,
}

impl TodoOps {
    /// Bind the API client to the shared cache.
    pub fn new(api: TodoApi, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    /// The todo list collection, served from cache when fresh.
    pub async fn ensure_list(&self) -> ApiResult<TodoList> {
        let api = self.api.clone();
        self.cache
            .ensure(&QueryKey::todo_list(), move || {
                let api = api.clone();
                async move { api.list().await }
            })
            .await
    }

    /// One todo's detail record, served from cache when fresh.
    pub async fn ensure_detail(&self, name: &TodoName) -> ApiResult<Todo> {
        let api = self.api.clone();
        let name_owned = name.clone();
        self.cache
            .ensure(&QueryKey::todo(name), move || {
                let api = api.clone();
                let name = name_owned.clone();
                async move { api.get(&name).await }
            })
            .await
    }

    /// Create a todo list and refresh the collection.
    pub async fn create(&self, todo: &NewTodo) -> ApiResult<()> {
        self.api.create(todo).await?;
        self.cache.invalidate(&QueryKey::todo_list());
        Ok(())
    }

    /// Update a todo list and refresh both the collection and its detail.
    pub async fn update(&self, name: &TodoName, update: &UpdateTodo) -> ApiResult<()> {
        self.api.update(name, update).await?;
        self.cache.invalidate(&QueryKey::todo_list());
        self.cache.invalidate(&QueryKey::todo(name));
        Ok(())
    }

    /// Delete a todo list: evict its detail and item entries outright, then
    /// refresh the collection.
    pub async fn delete(&self, name: &TodoName) -> ApiResult<()> {
        self.api.delete(name).await?;
        self.cache.remove(&QueryKey::todo(name));
        self.cache.invalidate(&QueryKey::todo_list());
        Ok(())
    }
}
