//! Typed resource clients over the authenticated request pipeline.

mod recurring;
mod todo;
mod todo_item;

pub use recurring::RecurringApi;
pub use todo::TodoApi;
pub use todo_item::TodoItemApi;
