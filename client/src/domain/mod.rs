//! Domain model: resource records, the error taxonomy, and outbound ports.

pub mod error;
pub mod ports;

mod recurring_template;
mod session;
mod todo;
mod todo_item;

pub use error::{ApiError, ApiResult};
pub use recurring_template::{
    NewRecurringTemplate, RecurrenceInterval, RecurringTemplate, RecurringTemplateList,
    UpdateRecurringTemplate,
};
pub use session::{
    AUTH_CALLBACK_PATH, AuthUser, LOGIN_PATH, REDIRECT_STORAGE_KEY, Session, SessionState,
    TOKEN_STORAGE_KEY, USER_STORAGE_KEY,
};
pub use todo::{NewTodo, Todo, TodoList, TodoName, TodoNameError, TodoSummary, UpdateTodo, Visibility};
pub use todo_item::{CreatedTodoItem, NewTodoItem, TodoItem, TodoItemList};
