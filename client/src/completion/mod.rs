//! Debounced completion batching for todo items.

mod batch;
mod batcher;

pub use batch::{CompletionBatch, TimerCommand};
pub use batcher::CompletionBatcher;
