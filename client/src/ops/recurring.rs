//! Recurring template operations: cached reads and invalidating mutations.

use std::sync::Arc;

use uuid::Uuid;

use crate::api::RecurringApi;
use crate::cache::{QueryCache, QueryKey};
use crate::domain::{
    ApiError, ApiResult, NewRecurringTemplate, RecurrenceInterval, RecurringTemplate,
    RecurringTemplateList, TodoName, UpdateRecurringTemplate,
};

/// Cached operations over one todo's recurring templates.
#[derive(Clone)]
pub struct RecurringOps {
    api: RecurringApi,
    cache: Arc<QueryCache>,
}

impl RecurringOps {
    /// Bind the API client to the shared cache.
    pub fn new(api: RecurringApi, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    /// One todo's template collection, served from cache when fresh.
    pub async fn ensure_templates(&self, name: &TodoName) -> ApiResult<RecurringTemplateList> {
        let api = self.api.clone();
        let name_owned = name.clone();
        self.cache
            .ensure(&QueryKey::recurring_templates(name), move || {
                let api = api.clone();
                let name = name_owned.clone();
                async move { api.list(&name).await }
            })
            .await
    }

    /// One template record, served from cache when fresh.
    pub async fn ensure_template(
        &self,
        name: &TodoName,
        template_id: Uuid,
    ) -> ApiResult<RecurringTemplate> {
        let api = self.api.clone();
        let name_owned = name.clone();
        self.cache
            .ensure(&QueryKey::recurring_template(name, template_id), move || {
                let api = api.clone();
                let name = name_owned.clone();
                async move { api.get(&name, template_id).await }
            })
            .await
    }

    /// Create a template; template creation can eagerly generate items, so
    /// the item collection refreshes too.
    pub async fn create(
        &self,
        name: &TodoName,
        template: &NewRecurringTemplate,
    ) -> ApiResult<RecurringTemplate> {
        validate_template(&template.title, &template.recurrence_interval)?;
        let created = self.api.create(name, template).await?;
        self.cache.invalidate(&QueryKey::recurring_templates(name));
        self.cache.invalidate(&QueryKey::todo_items(name));
        Ok(created)
    }

    /// Update a template and refresh its record, the collection, and the
    /// owning todo's items.
    pub async fn update(
        &self,
        name: &TodoName,
        template_id: Uuid,
        update: &UpdateRecurringTemplate,
    ) -> ApiResult<RecurringTemplate> {
        validate_template(&update.title, &update.recurrence_interval)?;
        let updated = self.api.update(name, template_id, update).await?;
        self.cache.invalidate(&QueryKey::recurring_templates(name));
        self.cache
            .invalidate(&QueryKey::recurring_template(name, template_id));
        self.cache.invalidate(&QueryKey::todo_items(name));
        Ok(updated)
    }

    /// Delete a template: evict its record and refresh the collection.
    pub async fn delete(&self, name: &TodoName, template_id: Uuid) -> ApiResult<()> {
        self.api.delete(name, template_id).await?;
        self.cache
            .remove(&QueryKey::recurring_template(name, template_id));
        self.cache.invalidate(&QueryKey::recurring_templates(name));
        Ok(())
    }
}

fn validate_template(title: &str, interval: &RecurrenceInterval) -> ApiResult<()> {
    if title.trim().is_empty() {
        return Err(ApiError::validation("template title must not be blank"));
    }
    if interval.is_zero() {
        return Err(ApiError::validation(
            "recurrence interval must not be zero",
        ));
    }
    Ok(())
}
