//! Debounced completion batcher for one mounted todo list.
//!
//! Clicks flow into the pure [`CompletionBatch`] machine; this layer drives
//! the debounce timer it asks for and commits the batch over the item
//! operations when the window elapses. Failures settle quietly: the item
//! stays uncompleted and the user may click again.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use super::batch::{CompletionBatch, TimerCommand};
use crate::domain::TodoName;
use crate::ops::TodoItemOps;

/// Debounced completion controller; cheap to clone, shared per list screen.
#[derive(Clone)]
pub struct CompletionBatcher {
    inner: Arc<BatcherInner>,
}

struct BatcherInner {
    todo_name: TodoName,
    items: TodoItemOps,
    batch: Mutex<CompletionBatch>,
    timer: Mutex<Option<JoinHandle<()>>>,
    window: Duration,
}

impl CompletionBatcher {
    /// Build a batcher for one todo list with the given debounce window.
    pub fn new(todo_name: TodoName, items: TodoItemOps, window: Duration) -> Self {
        Self {
            inner: Arc::new(BatcherInner {
                todo_name,
                items,
                batch: Mutex::new(CompletionBatch::new()),
                timer: Mutex::new(None),
                window,
            }),
        }
    }

    /// Flip an item's scheduled completion and adjust the window.
    pub fn toggle(&self, item_id: Uuid) {
        let command = self.inner.lock_batch().toggle(item_id);
        self.apply(command);
    }

    /// A new item landed; push the window back so the batch doesn't fire
    /// mid-edit.
    pub fn note_item_created(&self) {
        let command = self.inner.lock_batch().note_item_created();
        self.apply(command);
    }

    /// Whether the item renders as completing.
    pub fn is_pending(&self, item_id: Uuid) -> bool {
        self.inner.lock_batch().is_pending(item_id)
    }

    fn apply(&self, command: TimerCommand) {
        match command {
            TimerCommand::Keep => {}
            TimerCommand::Cancel => self.inner.abort_timer(),
            TimerCommand::Restart => {
                self.inner.abort_timer();
                let inner = Arc::clone(&self.inner);
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(inner.window).await;
                    inner.commit();
                });
                *self.inner.lock_timer() = Some(handle);
            }
        }
    }
}

impl BatcherInner {
    /// Hand the scheduled batch to the network, one request per id.
    fn commit(self: &Arc<Self>) {
        let ids = self.lock_batch().begin_commit();
        debug!(todo = %self.todo_name, count = ids.len(), "committing completion batch");
        for id in ids {
            let inner = Arc::clone(self);
            tokio::spawn(async move {
                if let Err(err) = inner.items.complete(&inner.todo_name, id).await {
                    warn!(todo = %inner.todo_name, item = %id, error = %err,
                        "completion failed; item stays open");
                }
                inner.lock_batch().settle(id);
            });
        }
    }

    fn abort_timer(&self) {
        if let Some(handle) = self.lock_timer().take() {
            handle.abort();
        }
    }

    fn lock_batch(&self) -> std::sync::MutexGuard<'_, CompletionBatch> {
        self.batch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_timer(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for BatcherInner {
    fn drop(&mut self) {
        if let Some(handle) = self.lock_timer().take() {
            handle.abort();
        }
    }
}
