//! Outbound ports: the contracts adapters implement for the core.

mod macros;

mod http_transport;
mod navigator;
mod session_storage;

pub use http_transport::{HttpTransport, Method, TransportError, WireRequest, WireResponse};
pub use navigator::Navigator;
pub use session_storage::{SessionStorage, StorageError};
