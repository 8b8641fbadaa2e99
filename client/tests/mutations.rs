//! Invalidation behaviour of the mutation operations.

#[expect(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
mod support;

use checklist_client::cache::QueryKey;
use checklist_client::domain::ports::Method;
use checklist_client::domain::{ApiError, NewTodo, NewTodoItem, UpdateTodo, Visibility};
use rstest::rstest;
use serde_json::json;

use support::{Harness, drain, logged_in_harness, todo_name};

fn count_calls(h: &Harness, method: Method, url: &str) -> usize {
    h.transport
        .requests()
        .iter()
        .filter(|request| request.method == method && request.url == url)
        .count()
}

#[rstest]
#[tokio::test]
async fn creating_a_todo_refetches_the_watched_list() {
    let h = logged_in_harness();
    let _rx = h.context.cache().subscribe(&QueryKey::todo_list());
    h.transport.push_json(200, json!({ "items": [] }));
    h.context.todos().ensure_list().await.expect("prime list");

    h.transport.push(200, "");
    h.transport.push_json(200, json!({ "items": [] }));
    h.context
        .todos()
        .create(&NewTodo {
            name: todo_name("groceries"),
            visibility: Visibility::Public,
        })
        .await
        .expect("create");
    drain().await;

    assert_eq!(count_calls(&h, Method::Post, "https://api.test/todo"), 1);
    assert_eq!(
        count_calls(&h, Method::Get, "https://api.test/todo"),
        2,
        "list fetched once to prime and once after the mutation"
    );
}

#[rstest]
#[tokio::test]
async fn updating_a_todo_refetches_both_the_list_and_the_detail() {
    let h = logged_in_harness();
    let name = todo_name("groceries");
    let _list_rx = h.context.cache().subscribe(&QueryKey::todo_list());
    let _detail_rx = h.context.cache().subscribe(&QueryKey::todo(&name));
    h.transport.push_json(200, json!({ "items": [] }));
    h.context.todos().ensure_list().await.expect("prime list");
    h.transport.push_json(
        200,
        json!({
            "name": "groceries",
            "create_time": "2024-05-01T10:00:00Z",
            "update_time": "2024-05-01T10:00:00Z"
        }),
    );
    h.context
        .todos()
        .ensure_detail(&name)
        .await
        .expect("prime detail");

    h.transport.push(200, "");
    // Refetch order is unordered across entries; bodies are placeholders.
    h.transport.push(200, "{}");
    h.transport.push(200, "{}");
    h.context
        .todos()
        .update(
            &name,
            &UpdateTodo {
                name: todo_name("groceries"),
            },
        )
        .await
        .expect("update");
    drain().await;

    assert_eq!(count_calls(&h, Method::Put, "https://api.test/todo/groceries"), 1);
    assert_eq!(count_calls(&h, Method::Get, "https://api.test/todo"), 2);
    assert_eq!(
        count_calls(&h, Method::Get, "https://api.test/todo/groceries"),
        2
    );
}

#[rstest]
#[tokio::test]
async fn deleting_a_todo_evicts_its_subtree() {
    let h = logged_in_harness();
    let name = todo_name("groceries");
    let mut detail_rx = h.context.cache().subscribe(&QueryKey::todo(&name));
    let mut items_rx = h.context.cache().subscribe(&QueryKey::todo_items(&name));

    h.transport.push(200, "");
    h.context.todos().delete(&name).await.expect("delete");
    drain().await;

    assert!(detail_rx.changed().await.is_err(), "detail entry evicted");
    assert!(items_rx.changed().await.is_err(), "item entry evicted");
    assert_eq!(
        count_calls(&h, Method::Delete, "https://api.test/todo/groceries"),
        1
    );
}

#[rstest]
#[tokio::test]
async fn creating_an_item_refetches_the_todo_detail_and_items() {
    let h = logged_in_harness();
    let name = todo_name("groceries");
    let _detail_rx = h.context.cache().subscribe(&QueryKey::todo(&name));
    let _items_rx = h.context.cache().subscribe(&QueryKey::todo_items(&name));
    h.transport.push_json(
        200,
        json!({
            "name": "groceries",
            "create_time": "2024-05-01T10:00:00Z",
            "update_time": "2024-05-01T10:00:00Z"
        }),
    );
    h.context
        .todos()
        .ensure_detail(&name)
        .await
        .expect("prime detail");
    h.transport.push_json(200, json!({ "items": [] }));
    h.context
        .items()
        .ensure_items(&name)
        .await
        .expect("prime items");

    h.transport.push_json(
        200,
        json!({
            "todo_item_id": "0b8e4c2e-9f3c-4a39-a65a-5a2d9f8cb0d1",
            "title": "milk",
            "is_complete": false
        }),
    );
    h.transport.push(200, "{}");
    h.transport.push(200, "{}");
    let created = h
        .context
        .items()
        .create(
            &name,
            &NewTodoItem {
                title: "milk".to_owned(),
                due_date: None,
            },
        )
        .await
        .expect("create item");
    assert_eq!(created.title, "milk");
    drain().await;

    assert_eq!(
        count_calls(&h, Method::Get, "https://api.test/todo/groceries"),
        2,
        "detail refetched after the mutation"
    );
    assert_eq!(
        count_calls(&h, Method::Get, "https://api.test/todo/groceries/item"),
        2,
        "items refetched after the mutation"
    );
}

#[rstest]
#[tokio::test]
async fn blank_item_titles_never_reach_the_network() {
    let h = logged_in_harness();
    let err = h
        .context
        .items()
        .create(
            &todo_name("groceries"),
            &NewTodoItem {
                title: "   ".to_owned(),
                due_date: None,
            },
        )
        .await
        .expect_err("blank title rejected");
    assert!(matches!(err, ApiError::Validation { .. }));
    assert_eq!(h.transport.request_count(), 0);
}
