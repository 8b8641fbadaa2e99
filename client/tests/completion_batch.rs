//! Debounce behaviour of the completion batcher, on a paused clock.

#[expect(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
mod support;

use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use tokio::time::advance;
use uuid::Uuid;

use support::{Harness, drain, logged_in_harness, todo_name};

fn item_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn push_completed_item(h: &Harness, id: Uuid) {
    h.transport.push_json(
        200,
        json!({
            "todo_item_id": id,
            "title": "milk",
            "is_complete": true,
            "complete_time": "2024-05-01T10:00:01Z",
            "create_time": "2024-05-01T10:00:00Z",
            "update_time": "2024-05-01T10:00:01Z"
        }),
    );
}

fn completion_count(h: &Harness) -> usize {
    h.transport.count_matching("/complete")
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn reclicking_inside_the_window_cancels_the_completion() {
    let h = logged_in_harness();
    let batcher = h.context.completion_batcher(todo_name("groceries"));
    let a = item_id(1);

    batcher.toggle(a);
    drain().await;
    batcher.toggle(a);
    drain().await;

    advance(Duration::from_millis(1500)).await;
    drain().await;
    assert_eq!(completion_count(&h), 0);
    assert!(!batcher.is_pending(a));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn a_single_click_commits_after_the_window() {
    let h = logged_in_harness();
    let batcher = h.context.completion_batcher(todo_name("groceries"));
    let a = item_id(1);
    push_completed_item(&h, a);

    batcher.toggle(a);
    drain().await;
    advance(Duration::from_millis(999)).await;
    drain().await;
    assert_eq!(completion_count(&h), 0, "window not yet elapsed");

    advance(Duration::from_millis(1)).await;
    drain().await;
    assert_eq!(completion_count(&h), 1);
    let request = h.transport.requests().pop().expect("one request");
    assert_eq!(
        request.url,
        format!("https://api.test/todo/groceries/item/{a}/complete")
    );
    assert!(!batcher.is_pending(a), "settled after the response");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn two_clicks_share_one_window_from_the_last_click() {
    let h = logged_in_harness();
    let batcher = h.context.completion_batcher(todo_name("groceries"));
    let (a, b) = (item_id(1), item_id(2));
    push_completed_item(&h, a);
    push_completed_item(&h, b);

    batcher.toggle(a);
    drain().await;
    advance(Duration::from_millis(400)).await;
    batcher.toggle(b);
    drain().await;

    advance(Duration::from_millis(999)).await;
    drain().await;
    assert_eq!(completion_count(&h), 0, "window restarted by the second click");

    advance(Duration::from_millis(1)).await;
    drain().await;
    assert_eq!(completion_count(&h), 2, "one request per item, together");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn item_creation_pushes_the_window_back() {
    let h = logged_in_harness();
    let batcher = h.context.completion_batcher(todo_name("groceries"));
    let a = item_id(1);
    push_completed_item(&h, a);

    batcher.toggle(a);
    drain().await;
    advance(Duration::from_millis(600)).await;
    batcher.note_item_created();
    drain().await;

    advance(Duration::from_millis(600)).await;
    drain().await;
    assert_eq!(completion_count(&h), 0, "original deadline no longer fires");

    advance(Duration::from_millis(400)).await;
    drain().await;
    assert_eq!(completion_count(&h), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn a_failed_completion_settles_without_retry() {
    let h = logged_in_harness();
    let batcher = h.context.completion_batcher(todo_name("groceries"));
    let a = item_id(1);
    // Nothing scripted: the completion request dies on the wire.

    batcher.toggle(a);
    drain().await;
    advance(Duration::from_millis(1000)).await;
    drain().await;

    assert_eq!(completion_count(&h), 1, "exactly one attempt");
    assert!(!batcher.is_pending(a), "failure clears the pending state");

    advance(Duration::from_millis(2000)).await;
    drain().await;
    assert_eq!(completion_count(&h), 1, "no automatic retry");
}
