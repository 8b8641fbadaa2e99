//! Outbound port for the durable session record.

use super::macros::define_port_error;

define_port_error! {
    /// Failures raised by the storage backend.
    pub enum StorageError {
        /// The backend rejected or could not complete the operation.
        Backend => "session storage failure: {message}",
    }
}

/// Durable string storage for the session record.
///
/// Mirrors a browser's origin-scoped key-value store: synchronous, string
/// keyed, and shared by every component of one application instance.
pub trait SessionStorage: Send + Sync {
    /// Read the value under `key`, if present.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`; absent keys are not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
