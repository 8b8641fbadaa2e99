//! Outbound port for the host application's location and navigation.

/// Location access and navigation as the host shell provides them.
///
/// Navigation is fire-and-forget; the shell owns routing and may debounce or
/// refuse a navigation, so there is no failure channel here.
pub trait Navigator: Send + Sync {
    /// Scheme and authority of the current location, e.g. `https://app.test`.
    fn origin(&self) -> String;

    /// Path plus query of the current location, e.g. `/todo/groceries?tab=1`.
    fn current_path_and_query(&self) -> String;

    /// Move the shell to an app-internal path.
    fn navigate(&self, path: &str);
}
