//! Snapshot of the authentication state.

use crate::tokens::AuthToken;
use crate::types::Identity;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading the persisted session at startup.
    Restoring,
    /// No credential is held.
    Unauthenticated,
    /// A login or registration is in flight.
    Authenticating,
    /// A credential and identity are held.
    Authenticated,
}

/// The in-memory pairing of credential and identity plus a loading flag.
///
/// Values are only built through the constructors below, which keep
/// `credential` and `identity` both set or both unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    credential: Option<AuthToken>,
    identity: Option<Identity>,
    phase: Phase,
}

impl Session {
    /// The state before `restore` has completed.
    pub fn restoring() -> Self {
        Self {
            credential: None,
            identity: None,
            phase: Phase::Restoring,
        }
    }

    /// No session.
    pub fn unauthenticated() -> Self {
        Self {
            credential: None,
            identity: None,
            phase: Phase::Unauthenticated,
        }
    }

    /// A login or registration is running.
    pub fn authenticating() -> Self {
        Self {
            credential: None,
            identity: None,
            phase: Phase::Authenticating,
        }
    }

    /// A held credential for the given identity.
    pub fn authenticated(credential: AuthToken, identity: Identity) -> Self {
        Self {
            credential: Some(credential),
            identity: Some(identity),
            phase: Phase::Authenticated,
        }
    }

    pub fn credential(&self) -> Option<&AuthToken> {
        self.credential.as_ref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while restoring or while an authentication operation runs.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Restoring | Phase::Authenticating)
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == Phase::Authenticated
    }

    /// True if the held identity is an administrator.
    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(|i| i.is_admin)
    }

    /// Returns the username of the held identity.
    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.username.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_only_while_restoring_or_authenticating() {
        assert!(Session::restoring().is_loading());
        assert!(Session::authenticating().is_loading());
        assert!(!Session::unauthenticated().is_loading());

        let session = Session::authenticated(AuthToken::new("t"), Identity::synthesize("alice"));
        assert!(!session.is_loading());
    }

    #[test]
    fn authenticated_holds_both_halves() {
        let session = Session::authenticated(AuthToken::new("t"), Identity::synthesize("admin"));
        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert_eq!(session.username(), Some("admin"));
        assert_eq!(session.credential().map(AuthToken::as_str), Some("t"));
    }

    #[test]
    fn unauthenticated_holds_nothing() {
        let session = Session::unauthenticated();
        assert!(session.credential().is_none());
        assert!(session.identity().is_none());
        assert!(!session.is_admin());
    }
}
