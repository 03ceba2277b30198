use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

use crate::models::SessionIdentity;

/// IdentityError
///
/// Ways the identity fetch can fail. Each one leaves the session empty, which
/// keeps the admin area closed to the loaded-identity check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The backend could not be reached at all.
    #[error("server connection error: {0}")]
    Connection(String),

    /// The backend rejected the session (HTTP 401).
    #[error("session expired")]
    Unauthorized,

    /// Any other non-success status.
    #[error("{code}: {reason}")]
    Status { code: u16, reason: String },

    /// The response body was not an identity.
    #[error("malformed identity payload: {0}")]
    Decode(String),
}

impl IdentityError {
    /// The text shown to the user on the notification surface.
    pub fn user_message(&self) -> String {
        match self {
            IdentityError::Connection(_) => "Server Connection Error".to_string(),
            IdentityError::Unauthorized => {
                "Session is expired. You are redirecting to login page ...".to_string()
            }
            IdentityError::Status { code, reason } => format!("{}: {}", code, reason),
            IdentityError::Decode(_) => "Invalid response from server".to_string(),
        }
    }
}

// 1. IdentityService Contract
/// IdentityService
///
/// Fetches the identity of the current session from the backend. Called once,
/// at start-up, before the first navigation settles.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn fetch_current(&self) -> Result<SessionIdentity, IdentityError>;
}

/// IdentityState
///
/// The shared handle type for the identity collaborator.
pub type IdentityState = Arc<dyn IdentityService>;

// 2. The Real Implementation (REST backend)
/// HttpIdentityService
///
/// Reads `GET {api_base_url}/me`. The backend answers with the user record
/// (`id`, `username`, `is_staff`, ...) for an authenticated session and 401
/// otherwise.
#[derive(Clone, Debug)]
pub struct HttpIdentityService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityService {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuses an existing client, e.g. one with a cookie store.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/me", self.base_url)
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn fetch_current(&self) -> Result<SessionIdentity, IdentityError> {
        let url = self.endpoint();
        tracing::debug!(%url, "fetching current identity");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            // The backend sits behind caching proxies; always ask for a fresh copy.
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| IdentityError::Connection(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(IdentityError::Unauthorized);
        }
        if !status.is_success() {
            return Err(IdentityError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response
            .json::<SessionIdentity>()
            .await
            .map_err(|e| IdentityError::Decode(e.to_string()))
    }
}

// 3. The Mock Implementation (tests)
/// MockIdentityService
///
/// Returns a fixed outcome and counts how often it was asked.
#[derive(Debug)]
pub struct MockIdentityService {
    outcome: Result<SessionIdentity, IdentityError>,
    calls: AtomicUsize,
}

impl MockIdentityService {
    pub fn new(identity: SessionIdentity) -> Self {
        Self {
            outcome: Ok(identity),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn new_failing(error: IdentityError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn fetch_current(&self) -> Result<SessionIdentity, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
