use std::env;

use crate::routes::admin::ADMIN_ROUTE_PREFIX;

/// AppConfig
///
/// Holds the console's entire configuration state. It is loaded once at
/// start-up and then only read: the navigator copies the values it needs into
/// its resolver, the identity service takes the API base URL.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the log format and the fail-fast checks.
    pub env: Env,
    // Base URL of the REST backend (the `me` resource lives under it).
    pub api_base_url: String,
    // Path prefix of the administrative area.
    pub admin_prefix: String,
    // First component of every document title.
    pub title_base: String,
    // Separator between the title components.
    pub title_delimiter: String,
    // How long notifications stay on screen, in milliseconds.
    pub message_delay_ms: u64,
    // Upper bound on redirect hops per navigation.
    pub max_redirect_hops: usize,
    // When set, the admin area is denied until a staff identity is loaded.
    pub strict_admin_gate: bool,
}

/// Env
///
/// Defines the runtime context: local development (pretty logs, backend on
/// localhost) or production (JSON logs, explicit backend URL).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const LOCAL_API_BASE_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_TITLE_BASE: &str = "Co Database";
const DEFAULT_TITLE_DELIMITER: &str = " :: ";
const DEFAULT_MESSAGE_DELAY_MS: u64 = 5000;
const DEFAULT_MAX_REDIRECT_HOPS: usize = 8;

impl Default for AppConfig {
    /// default
    ///
    /// Provides a non-panicking configuration for tests and embedding, without
    /// reading any environment variable.
    fn default() -> Self {
        Self {
            env: Env::Local,
            api_base_url: LOCAL_API_BASE_URL.to_string(),
            admin_prefix: ADMIN_ROUTE_PREFIX.to_string(),
            title_base: DEFAULT_TITLE_BASE.to_string(),
            title_delimiter: DEFAULT_TITLE_DELIMITER.to_string(),
            message_delay_ms: DEFAULT_MESSAGE_DELAY_MS,
            max_redirect_hops: DEFAULT_MAX_REDIRECT_HOPS,
            strict_admin_gate: false,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables. Call
    /// `dotenv::dotenv()` first to pick up a `.env` file.
    ///
    /// # Panics
    /// Panics in production when `API_BASE_URL` is not set, so the console
    /// never starts against a guessed backend.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let api_base_url = match env {
            Env::Production => {
                env::var("API_BASE_URL").expect("FATAL: API_BASE_URL must be set in production.")
            }
            Env::Local => {
                env::var("API_BASE_URL").unwrap_or_else(|_| LOCAL_API_BASE_URL.to_string())
            }
        };

        Self {
            env,
            api_base_url,
            admin_prefix: env::var("ADMIN_ROUTE_PREFIX")
                .unwrap_or_else(|_| ADMIN_ROUTE_PREFIX.to_string()),
            title_base: env::var("TITLE_BASE").unwrap_or_else(|_| DEFAULT_TITLE_BASE.to_string()),
            title_delimiter: DEFAULT_TITLE_DELIMITER.to_string(),
            message_delay_ms: parse_var("MESSAGE_DELAY_MS").unwrap_or(DEFAULT_MESSAGE_DELAY_MS),
            max_redirect_hops: parse_var("MAX_REDIRECT_HOPS").unwrap_or(DEFAULT_MAX_REDIRECT_HOPS),
            strict_admin_gate: env::var("STRICT_ADMIN_GATE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key, value = %raw, "ignoring unparsable configuration value");
                None
            }
        },
        Err(_) => None,
    }
}
