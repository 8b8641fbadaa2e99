//! Client core for the checklist application: authenticated requests, typed
//! resource clients, a query cache with prefix invalidation, the auth
//! session lifecycle, and debounced completion batching.

pub mod api;
pub mod cache;
pub mod completion;
pub mod config;
pub mod context;
pub mod domain;
pub mod ops;
pub mod outbound;
pub mod request;
pub mod session;

/// Fully wired client core for one application instance.
pub use context::AppContext;
