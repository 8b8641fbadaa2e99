//! In-memory navigator adapter.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::domain::ports::Navigator;

/// [`Navigator`] that tracks location in memory.
///
/// Serves headless hosts and tests; a browser host would adapt its own
/// location API instead.
#[derive(Debug)]
pub struct MemoryNavigator {
    origin: String,
    current: Mutex<String>,
    visited: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    /// Start at `/` under the given origin.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            current: Mutex::new("/".to_owned()),
            visited: Mutex::new(Vec::new()),
        }
    }

    /// Move the location without recording a navigation.
    pub fn set_current(&self, path_and_query: impl Into<String>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = path_and_query.into();
    }

    /// Every path navigated to, oldest first.
    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for MemoryNavigator {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn current_path_and_query(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn navigate(&self, path: &str) {
        debug!(path, "navigating");
        self.set_current(path);
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_owned());
    }
}
