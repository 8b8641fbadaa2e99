//! Behaviour of the authenticated request pipeline.

#[expect(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
mod support;

use checklist_client::domain::{
    ApiError, SessionState, TOKEN_STORAGE_KEY, USER_STORAGE_KEY,
};
use checklist_client::domain::ports::SessionStorage;
use rstest::rstest;
use serde_json::json;

use support::{harness, logged_in_harness};

#[rstest]
#[tokio::test]
async fn attaches_the_bearer_token_and_joins_the_base_url() {
    let h = logged_in_harness();
    h.transport.push_json(200, json!({ "items": [] }));

    h.context.todos().ensure_list().await.expect("list");

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 1);
    let request = requests.first().expect("one request");
    assert_eq!(request.url, "https://api.test/todo");
    assert_eq!(request.bearer_token.as_deref(), Some("token-1"));
}

#[rstest]
#[tokio::test]
async fn falls_back_to_stored_token_and_caches_it() {
    let h = harness();
    h.storage
        .set(TOKEN_STORAGE_KEY, "stored-token")
        .expect("seed token");
    h.transport.push_json(200, json!({ "items": [] }));
    h.transport.push_json(200, json!({ "items": [] }));

    h.context.todos().ensure_list().await.expect("first list");
    assert_eq!(
        h.context.client().token().as_deref(),
        Some("stored-token"),
        "token cell primed from storage"
    );

    h.storage.remove(TOKEN_STORAGE_KEY).expect("drop stored copy");
    h.context.cache().clear();
    h.context.todos().ensure_list().await.expect("second list");
    let requests = h.transport.requests();
    assert_eq!(
        requests.get(1).and_then(|r| r.bearer_token.as_deref()),
        Some("stored-token"),
        "second request uses the cached cell, not storage"
    );
}

#[rstest]
#[tokio::test]
async fn rejected_token_tears_the_session_down_once() {
    let h = logged_in_harness();
    h.transport.push(401, "");

    let err = h
        .context
        .todos()
        .ensure_list()
        .await
        .expect_err("rejected token fails the call");
    assert_eq!(err, ApiError::authentication(401));

    assert_eq!(h.context.client().token(), None, "token cell cleared");
    assert_eq!(h.storage.get(TOKEN_STORAGE_KEY).expect("get"), None);
    assert_eq!(h.storage.get(USER_STORAGE_KEY).expect("get"), None);
    assert_eq!(
        h.context.session().state(),
        SessionState::Unauthenticated,
        "handler logged the session out"
    );
    assert_eq!(
        h.navigator.visited(),
        vec!["/login".to_owned()],
        "handler redirected exactly once"
    );
}

#[rstest]
#[case(401)]
#[case(403)]
#[tokio::test]
async fn rejection_without_a_token_is_a_plain_http_error(#[case] status: u16) {
    let h = harness();
    h.transport.push(status, "no session");

    let err = h
        .context
        .todos()
        .ensure_list()
        .await
        .expect_err("unauthenticated call fails");
    assert_eq!(err, ApiError::http(status, "no session"));
    assert!(
        h.navigator.visited().is_empty(),
        "no teardown without a sent token"
    );
}

#[rstest]
#[tokio::test]
async fn transport_failure_surfaces_as_a_network_error() {
    let h = logged_in_harness();
    // Nothing scripted: the exchange fails like a dead network.
    let err = h
        .context
        .todos()
        .ensure_list()
        .await
        .expect_err("dead network fails the call");
    assert!(matches!(err, ApiError::Network { .. }));
}

#[rstest]
#[tokio::test]
async fn malformed_success_payload_is_a_decode_error() {
    let h = logged_in_harness();
    h.transport.push(200, "not json");

    let err = h
        .context
        .todos()
        .ensure_list()
        .await
        .expect_err("bad payload fails the call");
    assert!(matches!(err, ApiError::Decode { .. }));
}
