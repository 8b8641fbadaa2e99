//! Todo item operations: cached reads and invalidating mutations.

use std::sync::Arc;

use uuid::Uuid;

use crate::api::TodoItemApi;
use crate::cache::{QueryCache, QueryKey};
use crate::domain::{ApiError, ApiResult, CreatedTodoItem, NewTodoItem, TodoItem, TodoItemList, TodoName};

/// Cached operations over one todo's items.
#[derive(Clone)]
pub struct TodoItemOps {
    api: TodoItemApi,
    cache: Arc<QueryCache>,
}

impl TodoItemOps {
    /// Bind the API client to the shared cache.
    pub fn new(api: TodoItemApi, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    /// One todo's item collection, served from cache when fresh.
    pub async fn ensure_items(&self, name: &TodoName) -> ApiResult<TodoItemList> {
        let api = self.api.clone();
        let name_owned = name.clone();
        self.cache
            .ensure(&QueryKey::todo_items(name), move || {
                let api = api.clone();
                let name = name_owned.clone();
                async move { api.list(&name).await }
            })
            .await
    }

    /// Create an item and refresh the owning todo's detail and items.
    ///
    /// A blank title fails client-side; the request never reaches the
    /// network.
    pub async fn create(&self, name: &TodoName, item: &NewTodoItem) -> ApiResult<CreatedTodoItem> {
        if item.title.trim().is_empty() {
            return Err(ApiError::validation("item title must not be blank"));
        }
        let created = self.api.create(name, item).await?;
        self.cache.invalidate(&QueryKey::todo(name));
        self.cache.invalidate(&QueryKey::todo_items(name));
        Ok(created)
    }

    /// Mark an item complete and refresh the owning todo's items.
    pub async fn complete(&self, name: &TodoName, item_id: Uuid) -> ApiResult<TodoItem> {
        let item = self.api.complete(name, item_id).await?;
        self.cache.invalidate(&QueryKey::todo_items(name));
        Ok(item)
    }
}
