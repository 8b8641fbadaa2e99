//! Shared doubles and wiring helpers for the integration suites.
//!
//! The suites exercise the real pipeline, cache, session, and batching code
//! while substituting a deterministic transport: responses are scripted in
//! order and every outbound request is recorded for assertion.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use checklist_client::AppContext;
use checklist_client::config::ClientConfig;
use checklist_client::domain::ports::{
    HttpTransport, TransportError, WireRequest, WireResponse,
};
use checklist_client::domain::{AuthUser, TodoName};
use checklist_client::outbound::{MemoryNavigator, MemorySessionStorage};
use url::Url;

/// Transport double: scripted responses out, recorded requests in.
///
/// An exhausted script fails the exchange like a dead network would, so a
/// test that triggers more requests than it scripted fails loudly.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<WireResponse>>,
    seen: Mutex<Vec<WireRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response.
    pub fn push(&self, status: u16, body: &str) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(WireResponse {
                status,
                body: body.to_owned(),
            });
    }

    /// Queue a JSON response.
    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push(status, &body.to_string());
    }

    /// Every request executed so far, oldest first.
    pub fn requests(&self) -> Vec<WireRequest> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many requests have been executed.
    pub fn request_count(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// How many executed requests hit a URL containing `fragment`.
    pub fn count_matching(&self, fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.url.contains(fragment))
            .count()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        // One yield so concurrent callers can observe an in-flight exchange.
        tokio::task::yield_now().await;
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| TransportError::transport("response script exhausted"))
    }
}

/// Context plus handles on every double it was wired with.
pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub storage: Arc<MemorySessionStorage>,
    pub navigator: Arc<MemoryNavigator>,
    pub context: AppContext,
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        base_url: Url::parse("https://api.test").expect("base url"),
        completion_window: Duration::from_millis(1000),
        session_init_delay: Duration::ZERO,
        request_timeout: Duration::from_secs(5),
    }
}

static TRACING: std::sync::Once = std::sync::Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Wire a context over fresh doubles.
pub fn harness() -> Harness {
    init_tracing();
    let transport = Arc::new(ScriptedTransport::new());
    let storage = Arc::new(MemorySessionStorage::new());
    let navigator = Arc::new(MemoryNavigator::new("https://app.test"));
    let context = AppContext::new(
        test_config(),
        Arc::clone(&transport) as Arc<dyn HttpTransport>,
        Arc::clone(&storage) as Arc<dyn checklist_client::domain::ports::SessionStorage>,
        Arc::clone(&navigator) as Arc<dyn checklist_client::domain::ports::Navigator>,
    );
    Harness {
        transport,
        storage,
        navigator,
        context,
    }
}

/// Wire a context with an established session.
pub fn logged_in_harness() -> Harness {
    let harness = harness();
    harness.context.session().login(
        "token-1".to_owned(),
        AuthUser {
            user_id: "user-1".to_owned(),
            email: "user@example.test".to_owned(),
        },
    );
    harness
}

pub fn todo_name(raw: &str) -> TodoName {
    TodoName::new(raw).expect("valid todo name")
}

/// Let spawned tasks (refetches, committed completions) run to completion.
pub async fn drain() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
