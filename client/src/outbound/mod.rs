//! Outbound adapters implementing the domain ports.

mod http;
mod navigation;
mod storage;

pub use http::ReqwestTransport;
pub use navigation::MemoryNavigator;
pub use storage::MemorySessionStorage;
