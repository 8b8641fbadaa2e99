//! Mutation and cached-read operations binding the API clients to the cache.

mod recurring;
mod todo;
mod todo_item;

pub use recurring::RecurringOps;
pub use todo::TodoOps;
pub use todo_item::TodoItemOps;
