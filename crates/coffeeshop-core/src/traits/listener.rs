//! Session invalidation hook.

/// Why a persisted session was dropped by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    /// The server answered a request with 401.
    Unauthorized,
}

/// Receives a callback whenever the pipeline clears the persisted session.
///
/// Called synchronously before the failing request returns to its caller,
/// so implementations must not block.
pub trait InvalidationListener: Send + Sync {
    fn session_invalidated(&self, reason: InvalidationReason);
}
