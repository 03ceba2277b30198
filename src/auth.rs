use crate::models::SessionIdentity;

/// IdentityStatus
///
/// Where the one-time identity fetch stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityStatus {
    /// Not answered yet. The admin area is provisionally open.
    #[default]
    Pending,
    Loaded,
    /// The fetch failed or the session was rejected. The admin area stays closed.
    Failed,
}

/// Session
///
/// Holds the identity of the current user, as resolved once at start-up by the
/// identity service. The navigation resolver only ever reads the two role
/// predicates below; it never inspects the identity itself.
///
/// Lifecycle:
/// 1. Empty at process start (nothing loaded, no predicate holds).
/// 2. Populated once from the backend `me` resource.
/// 3. Cleared when the fetch fails or the backend rejects the session (401).
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<SessionIdentity>,
    status: IdentityStatus,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a session that already carries `identity`. Mostly useful for tests.
    pub fn with_identity(identity: SessionIdentity) -> Self {
        Self {
            identity: Some(identity),
            status: IdentityStatus::Loaded,
        }
    }

    pub fn status(&self) -> IdentityStatus {
        self.status
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    pub fn set_identity(&mut self, identity: SessionIdentity) {
        tracing::debug!(
            id = ?identity.id,
            is_staff = ?identity.is_staff,
            "session identity loaded"
        );
        self.identity = Some(identity);
        self.status = IdentityStatus::Loaded;
    }

    /// Drops any identity and records that none can be loaded.
    pub fn clear(&mut self) {
        if self.identity.take().is_some() {
            tracing::debug!("session identity cleared");
        }
        self.status = IdentityStatus::Failed;
    }

    /// is_loaded_user
    ///
    /// True once an identity carrying an `id` has been stored.
    pub fn is_loaded_user(&self) -> bool {
        self.identity.as_ref().is_some_and(|i| i.id.is_some())
    }

    /// is_staff_user
    ///
    /// True only when the staff flag is present and exactly `true`.
    /// A missing flag, or a missing identity, is never read as "allowed".
    pub fn is_staff_user(&self) -> bool {
        self.identity
            .as_ref()
            .is_some_and(|i| i.is_staff == Some(true))
    }
}
