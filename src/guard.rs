//! Advisory route guard.
//!
//! The session token lives only in client-side storage and travels only as a
//! Bearer header on API calls, so nothing server-visible exists to enforce
//! navigation against. The guard therefore allows every route and defers
//! enforcement to explicit `SessionContext::is_authenticated()` checks at the
//! call sites that need them. This is a documented gap, not a feature: real
//! enforcement would require moving the credential into server-readable
//! storage, which the backend contract does not offer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn new() -> Self {
        Self
    }

    /// Unconditionally allows; access control happens client-side.
    pub fn evaluate(&self, path: &str) -> GuardDecision {
        tracing::debug!(%path, "route guard pass-through");
        GuardDecision::Allow
    }
}
