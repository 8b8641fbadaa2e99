//! Client configuration parsing and validation.
//!
//! Centralises the environment-driven settings so they are validated
//! consistently and can be tested in isolation.

use std::time::Duration;

use mockable::Env;
use url::Url;

const BASE_URL_ENV: &str = "CHECKLIST_BASE_URL";
const COMPLETION_WINDOW_ENV: &str = "CHECKLIST_COMPLETION_WINDOW_MS";
const SESSION_INIT_DELAY_ENV: &str = "CHECKLIST_SESSION_INIT_DELAY_MS";
const REQUEST_TIMEOUT_ENV: &str = "CHECKLIST_REQUEST_TIMEOUT_MS";
const MILLIS_EXPECTED: &str = "a whole number of milliseconds";
const URL_EXPECTED: &str = "an absolute http(s) URL";

const DEFAULT_COMPLETION_WINDOW: Duration = Duration::from_millis(1000);
const DEFAULT_SESSION_INIT_DELAY: Duration = Duration::from_millis(100);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Settings derived from configuration toggles.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every relative request path is joined onto.
    pub base_url: Url,
    /// Debounce window for batched item completion.
    pub completion_window: Duration,
    /// Artificial pause during session recovery, guarding a loading flash.
    pub session_init_delay: Duration,
    /// Per-request transport deadline.
    pub request_timeout: Duration,
}

/// Errors raised while validating client configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Name of the absent variable.
        name: &'static str,
    },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Name of the offending variable.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Description of what would have been accepted.
        expected: &'static str,
    },
}

/// Build client settings from environment variables.
///
/// # Examples
///
/// ```rust
/// use checklist_client::config::client_config_from_env;
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "CHECKLIST_BASE_URL" => Some("https://api.example.test".to_string()),
///     _ => None,
/// });
///
/// let config = client_config_from_env(&env)?;
/// assert_eq!(config.completion_window.as_millis(), 1000);
/// # Ok(())
/// # }
/// ```
pub fn client_config_from_env<E: Env>(env: &E) -> Result<ClientConfig, ConfigError> {
    let base_url = base_url_from_env(env)?;
    let completion_window = millis_from_env(env, COMPLETION_WINDOW_ENV, DEFAULT_COMPLETION_WINDOW)?;
    let session_init_delay =
        millis_from_env(env, SESSION_INIT_DELAY_ENV, DEFAULT_SESSION_INIT_DELAY)?;
    let request_timeout = millis_from_env(env, REQUEST_TIMEOUT_ENV, DEFAULT_REQUEST_TIMEOUT)?;

    Ok(ClientConfig {
        base_url,
        completion_window,
        session_init_delay,
        request_timeout,
    })
}

fn base_url_from_env<E: Env>(env: &E) -> Result<Url, ConfigError> {
    let value = env
        .string(BASE_URL_ENV)
        .ok_or(ConfigError::MissingEnv { name: BASE_URL_ENV })?;
    let url = Url::parse(&value).map_err(|_| ConfigError::InvalidEnv {
        name: BASE_URL_ENV,
        value: value.clone(),
        expected: URL_EXPECTED,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnv {
            name: BASE_URL_ENV,
            value,
            expected: URL_EXPECTED,
        });
    }
    Ok(url)
}

fn millis_from_env<E: Env>(
    env: &E,
    name: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match env.string(name) {
        Some(value) => match value.trim().parse::<u64>() {
            Ok(millis) => Ok(Duration::from_millis(millis)),
            Err(_) => Err(ConfigError::InvalidEnv {
                name,
                value,
                expected: MILLIS_EXPECTED,
            }),
        },
        None => Ok(default),
    }
}
