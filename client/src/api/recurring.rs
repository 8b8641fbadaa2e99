//! Recurring template endpoints.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    ApiResult, NewRecurringTemplate, RecurringTemplate, RecurringTemplateList, TodoName,
    UpdateRecurringTemplate,
};
use crate::request::AuthClient;

/// Client for the `/todo/{name}/recurring` resource family.
#[derive(Clone)]
pub struct RecurringApi {
    client: Arc<AuthClient>,
}

impl RecurringApi {
    /// Build an API client over the shared request pipeline.
    pub fn new(client: Arc<AuthClient>) -> Self {
        Self { client }
    }

    /// `POST /todo/{name}/recurring`; returns the created template record.
    pub async fn create(
        &self,
        name: &TodoName,
        template: &NewRecurringTemplate,
    ) -> ApiResult<RecurringTemplate> {
        self.client
            .post_json(&format!("/todo/{name}/recurring"), template)
            .await
    }

    /// `GET /todo/{name}/recurring`.
    pub async fn list(&self, name: &TodoName) -> ApiResult<RecurringTemplateList> {
        self.client
            .get_json(&format!("/todo/{name}/recurring"))
            .await
    }

    /// `GET /todo/{name}/recurring/{id}`.
    pub async fn get(&self, name: &TodoName, template_id: Uuid) -> ApiResult<RecurringTemplate> {
        self.client
            .get_json(&format!("/todo/{name}/recurring/{template_id}"))
            .await
    }

    /// `PUT /todo/{name}/recurring/{id}`; returns the updated record.
    pub async fn update(
        &self,
        name: &TodoName,
        template_id: Uuid,
        update: &UpdateRecurringTemplate,
    ) -> ApiResult<RecurringTemplate> {
        self.client
            .put_json(&format!("/todo/{name}/recurring/{template_id}"), update)
            .await
    }

    /// `DELETE /todo/{name}/recurring/{id}`.
    pub async fn delete(&self, name: &TodoName, template_id: Uuid) -> ApiResult<()> {
        self.client
            .delete(&format!("/todo/{name}/recurring/{template_id}"))
            .await
    }
}
