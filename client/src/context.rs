//! Application context: explicit construction and wiring of every layer.
//!
//! One context per application instance. Nothing in this crate lives in a
//! module-level global; shells pass the context (or a clone of one of its
//! handles) to whichever screen needs it, and tear it down explicitly.

use std::sync::Arc;

use crate::api::{RecurringApi, TodoApi, TodoItemApi};
use crate::cache::QueryCache;
use crate::completion::CompletionBatcher;
use crate::config::ClientConfig;
use crate::domain::TodoName;
use crate::domain::ports::{HttpTransport, Navigator, SessionStorage};
use crate::ops::{RecurringOps, TodoItemOps, TodoOps};
use crate::outbound::ReqwestTransport;
use crate::request::AuthClient;
use crate::session::SessionStore;

/// Fully wired client core for one application instance.
pub struct AppContext {
    config: ClientConfig,
    client: Arc<AuthClient>,
    cache: Arc<QueryCache>,
    session: Arc<SessionStore>,
    todos: TodoOps,
    items: TodoItemOps,
    recurring: RecurringOps,
}

impl AppContext {
    /// Wire every layer over the given ports.
    ///
    /// The session-error handler is installed here, so a rejected token
    /// tears the session down and redirects from the moment the context
    /// exists.
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let client = Arc::new(AuthClient::new(
            transport,
            Arc::clone(&storage),
            config.base_url.clone(),
        ));
        let cache = Arc::new(QueryCache::new());
        let session = Arc::new(SessionStore::new(
            storage,
            navigator,
            Arc::clone(&client),
            config.session_init_delay,
        ));
        session.install_session_error_handler();
        let todos = TodoOps::new(TodoApi::new(Arc::clone(&client)), Arc::clone(&cache));
        let items = TodoItemOps::new(TodoItemApi::new(Arc::clone(&client)), Arc::clone(&cache));
        let recurring =
            RecurringOps::new(RecurringApi::new(Arc::clone(&client)), Arc::clone(&cache));
        Self {
            config,
            client,
            cache,
            session,
            todos,
            items,
            recurring,
        }
    }

    /// Wire a context over the reqwest transport.
    pub fn with_reqwest(
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, reqwest::Error> {
        let transport = Arc::new(ReqwestTransport::new(config.request_timeout)?);
        Ok(Self::new(config, transport, storage, navigator))
    }

    /// Recover any stored session; call once at application start.
    pub async fn initialize(&self) {
        self.session.initialize().await;
    }

    /// The settings this context was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The shared request pipeline.
    pub fn client(&self) -> &Arc<AuthClient> {
        &self.client
    }

    /// The shared query cache.
    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// The session lifecycle owner.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Todo list operations.
    pub fn todos(&self) -> &TodoOps {
        &self.todos
    }

    /// Todo item operations.
    pub fn items(&self) -> &TodoItemOps {
        &self.items
    }

    /// Recurring template operations.
    pub fn recurring(&self) -> &RecurringOps {
        &self.recurring
    }

    /// A debounced completion controller for one mounted todo list.
    pub fn completion_batcher(&self, todo_name: TodoName) -> CompletionBatcher {
        CompletionBatcher::new(todo_name, self.items.clone(), self.config.completion_window)
    }

    /// Tear the context down: unhook the session-error handler and drop
    /// every cached query.
    pub fn shutdown(&self) {
        self.client.clear_session_error_handler();
        self.cache.clear();
    }
}
