//! Auth session lifecycle: recovery, login, logout, and redirect handling.

mod callback;
mod redirect;
mod store;

pub use callback::CallbackOutcome;
pub use redirect::safe_redirect_path;
pub use store::SessionStore;
