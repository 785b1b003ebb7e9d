//! Session store: the single source of truth for who is logged in.

use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use coffeeshop_core::error::{AuthError, Error, StorageError};
use coffeeshop_core::{
    AuthToken, Credentials, Identity, InvalidationListener, InvalidationReason, Phase,
    RegisterRequest, Result, Session, TOKEN_KEY, USER_KEY,
};

use crate::client::ApiClient;

/// Owns the authentication state and its persistence lifecycle.
///
/// Created once at the application root. The state starts out as
/// [`Phase::Restoring`] until [`SessionStore::restore`] runs. Consumers read
/// it with [`SessionStore::current`] or watch it with
/// [`SessionStore::subscribe`].
///
/// The store registers itself with its [`ApiClient`], so a 401 on any request
/// clears the in-memory session at the same moment the persisted one is
/// removed.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    client: ApiClient,
    state: watch::Sender<Session>,
}

impl InvalidationListener for SessionInner {
    fn session_invalidated(&self, reason: InvalidationReason) {
        // A 401 during login is handled by the login path itself.
        let cleared = self.state.send_if_modified(|session| {
            if session.phase() == Phase::Authenticated {
                *session = Session::unauthenticated();
                true
            } else {
                false
            }
        });
        if cleared {
            info!(?reason, "Session invalidated by server");
        }
    }
}

impl SessionStore {
    /// Create the store and subscribe it to the client's invalidation events.
    pub fn new(client: ApiClient) -> Self {
        let (state, _) = watch::channel(Session::restoring());
        let inner = Arc::new(SessionInner { client, state });

        let listener: Weak<SessionInner> = Arc::downgrade(&inner);
        inner.client.add_listener(listener);

        Self { inner }
    }

    /// Returns the pipeline this store authenticates against.
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Returns a snapshot of the current state.
    pub fn current(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Watch the state for changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Returns the identity if a session is held.
    pub fn require_session(&self) -> Result<Identity> {
        self.current()
            .identity()
            .cloned()
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }

    /// Returns the identity if an administrator session is held.
    pub fn require_admin(&self) -> Result<Identity> {
        let identity = self.require_session()?;
        if !identity.is_admin {
            return Err(AuthError::AdminRequired.into());
        }
        Ok(identity)
    }

    /// Rehydrate the session from persisted storage without a network call.
    ///
    /// Read or parse failures leave the session unauthenticated and are only
    /// logged.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Session {
        let session = match self.read_persisted().await {
            Ok(Some((credential, identity))) => {
                debug!(username = %identity.username, "Restored persisted session");
                Session::authenticated(credential, identity)
            }
            Ok(None) => {
                debug!("No persisted session");
                Session::unauthenticated()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session");
                Session::unauthenticated()
            }
        };

        self.publish(session.clone());
        session
    }

    /// Log in and persist the issued credential.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::LoginFailed`] carrying the server's message, or
    /// `"Login failed"` when none was supplied.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        info!("Logging in");
        self.publish(Session::authenticating());

        match self.authenticate(&Credentials::new(username, password)).await {
            Ok(session) => {
                self.publish(session.clone());
                Ok(session)
            }
            Err(e) => {
                self.discard_persisted().await;
                self.publish(Session::unauthenticated());
                Err(AuthError::login_failed(e).into())
            }
        }
    }

    /// Create an account, then log in with the same username and password.
    ///
    /// The login only starts after registration has resolved, and the state
    /// stays [`Phase::Authenticating`] until both have finished.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RegistrationFailed`]. When the account was created
    /// but the automatic login failed, the login error is the source.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<Session> {
        info!("Registering");
        self.publish(Session::authenticating());

        if let Err(e) = self.inner.client.register(request).await {
            self.discard_persisted().await;
            self.publish(Session::unauthenticated());
            return Err(AuthError::registration_failed(e).into());
        }

        debug!("Account created, logging in");
        let credentials = Credentials::new(&request.username, request.password());
        match self.authenticate(&credentials).await {
            Ok(session) => {
                self.publish(session.clone());
                Ok(session)
            }
            Err(e) => {
                self.discard_persisted().await;
                self.publish(Session::unauthenticated());
                Err(AuthError::RegistrationFailed {
                    message: AuthError::REGISTRATION_FALLBACK.to_string(),
                    source: Some(Box::new(AuthError::login_failed(e).into())),
                }
                .into())
            }
        }
    }

    /// Remove the persisted session and clear the in-memory one.
    ///
    /// Never fails: removal errors are logged and the in-memory state is
    /// cleared regardless.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        info!("Logging out");
        self.discard_persisted().await;
        self.publish(Session::unauthenticated());
    }

    /// Call the login endpoint, persist the credential and synthesized identity.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let response = self.inner.client.login(credentials).await?;
        let credential = AuthToken::new(response.access_token);
        let identity = Identity::synthesize(credentials.username());

        if let Err(e) = self.persist(&credential, &identity).await {
            // Never leave a token without its identity behind.
            self.discard_persisted().await;
            return Err(e);
        }

        debug!(is_admin = identity.is_admin, "Session established");
        Ok(Session::authenticated(credential, identity))
    }

    /// Remove both persisted keys; failures are logged only.
    async fn discard_persisted(&self) {
        if let Err(e) = self
            .inner
            .client
            .store()
            .remove_all(&[TOKEN_KEY, USER_KEY])
            .await
        {
            warn!(error = %e, "Failed to remove persisted session");
        }
    }

    async fn persist(&self, credential: &AuthToken, identity: &Identity) -> Result<()> {
        let store = self.inner.client.store();
        let user = serde_json::to_string(identity).map_err(|e| StorageError::Corrupt {
            path: USER_KEY.to_string(),
            message: e.to_string(),
        })?;

        store.set(TOKEN_KEY, credential.as_str()).await?;
        store.set(USER_KEY, &user).await?;
        Ok(())
    }

    async fn read_persisted(&self) -> Result<Option<(AuthToken, Identity)>> {
        let store = self.inner.client.store();
        let token = store.get(TOKEN_KEY).await?.filter(|t| !t.is_empty());
        let user = store.get(USER_KEY).await?.filter(|u| !u.is_empty());

        let (Some(token), Some(user)) = (token, user) else {
            return Ok(None);
        };

        let identity: Identity = serde_json::from_str(&user).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                path: USER_KEY.to_string(),
                message: e.to_string(),
            })
        })?;

        Ok(Some((AuthToken::new(token), identity)))
    }

    fn publish(&self, session: Session) {
        self.inner.state.send_replace(session);
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.inner.state.borrow();
        f.debug_struct("SessionStore")
            .field("phase", &session.phase())
            .field("username", &session.username())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use coffeeshop_core::KeyValueStore;
    use coffeeshop_store::MemoryStore;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::ApiConfig;

    /// A store that fails selected operations and delegates the rest.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_get: bool,
        fail_remove: bool,
        fail_set: Option<&'static str>,
    }

    fn storage_failure(key: &str) -> Error {
        StorageError::Io {
            path: key.to_string(),
            message: "device unavailable".to_string(),
        }
        .into()
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            if self.fail_get {
                return Err(storage_failure(key));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_set.is_some_and(|k| k == key) {
                return Err(storage_failure(key));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<()> {
            if self.fail_remove {
                return Err(storage_failure(key));
            }
            self.inner.remove(key).await
        }
    }

    fn store_over(flaky: FlakyStore, address: &str) -> SessionStore {
        let config = ApiConfig::from_address(address).unwrap();
        let client = ApiClient::new(config, Arc::new(flaky)).unwrap();
        SessionStore::new(client)
    }

    fn store_with(memory: &MemoryStore) -> SessionStore {
        let client = ApiClient::new(ApiConfig::default(), Arc::new(memory.clone())).unwrap();
        SessionStore::new(client)
    }

    #[tokio::test]
    async fn starts_restoring() {
        let session = store_with(&MemoryStore::new());
        assert_eq!(session.current().phase(), Phase::Restoring);
        assert!(session.current().is_loading());
    }

    #[tokio::test]
    async fn restore_with_both_keys_is_authenticated() {
        let memory = MemoryStore::new();
        memory.set(TOKEN_KEY, "persisted-token").await.unwrap();
        let user = serde_json::to_string(&Identity::synthesize("admin")).unwrap();
        memory.set(USER_KEY, &user).await.unwrap();

        let session = store_with(&memory).restore().await;

        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert!(!session.is_loading());
        assert_eq!(session.credential().unwrap(), &"persisted-token");
    }

    #[tokio::test]
    async fn restore_with_missing_user_is_unauthenticated() {
        let memory = MemoryStore::new();
        memory.set(TOKEN_KEY, "persisted-token").await.unwrap();

        let session = store_with(&memory).restore().await;
        assert_eq!(session.phase(), Phase::Unauthenticated);
    }

    #[tokio::test]
    async fn restore_with_malformed_user_is_unauthenticated() {
        let memory = MemoryStore::new();
        memory.set(TOKEN_KEY, "persisted-token").await.unwrap();
        memory.set(USER_KEY, "{not json").await.unwrap();

        let store = store_with(&memory);
        let session = store.restore().await;
        assert_eq!(session.phase(), Phase::Unauthenticated);
        assert!(!store.current().is_loading());
    }

    #[tokio::test]
    async fn logout_clears_memory_and_storage() {
        let memory = MemoryStore::new();
        memory.set(TOKEN_KEY, "persisted-token").await.unwrap();
        let user = serde_json::to_string(&Identity::synthesize("bob")).unwrap();
        memory.set(USER_KEY, &user).await.unwrap();

        let store = store_with(&memory);
        store.restore().await;
        store.logout().await;

        assert_eq!(store.current(), Session::unauthenticated());
        assert!(memory.is_empty().await);
    }

    #[tokio::test]
    async fn invalidation_clears_authenticated_state() {
        let memory = MemoryStore::new();
        memory.set(TOKEN_KEY, "t").await.unwrap();
        let user = serde_json::to_string(&Identity::synthesize("bob")).unwrap();
        memory.set(USER_KEY, &user).await.unwrap();

        let store = store_with(&memory);
        store.restore().await;
        let mut rx = store.subscribe();

        store
            .inner
            .session_invalidated(InvalidationReason::Unauthorized);

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().phase(), Phase::Unauthenticated);
    }

    #[tokio::test]
    async fn invalidation_does_not_interrupt_authenticating() {
        let store = store_with(&MemoryStore::new());
        store.publish(Session::authenticating());

        store
            .inner
            .session_invalidated(InvalidationReason::Unauthorized);

        assert_eq!(store.current().phase(), Phase::Authenticating);
    }

    #[test]
    fn require_admin_rejects_regular_users() {
        let store = store_with(&MemoryStore::new());
        store.publish(Session::authenticated(
            AuthToken::new("t"),
            Identity::synthesize("alice"),
        ));

        assert!(store.require_session().is_ok());
        let err = store.require_admin().unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::AdminRequired)));
    }

    #[tokio::test]
    async fn restore_read_failure_is_unauthenticated() {
        let flaky = FlakyStore {
            fail_get: true,
            ..Default::default()
        };
        let store = store_over(flaky, "http://localhost:5001");

        let session = store.restore().await;

        assert_eq!(session.phase(), Phase::Unauthenticated);
        assert!(!store.current().is_loading());
    }

    #[tokio::test]
    async fn logout_clears_memory_when_removal_fails() {
        let memory = MemoryStore::new();
        memory.set(TOKEN_KEY, "t").await.unwrap();
        let user = serde_json::to_string(&Identity::synthesize("bob")).unwrap();
        memory.set(USER_KEY, &user).await.unwrap();

        let flaky = FlakyStore {
            inner: memory.clone(),
            fail_remove: true,
            ..Default::default()
        };
        let store = store_over(flaky, "http://localhost:5001");
        assert!(store.restore().await.is_authenticated());

        store.logout().await;

        assert_eq!(store.current(), Session::unauthenticated());
        assert!(memory.contains(TOKEN_KEY).await);
    }

    #[tokio::test]
    async fn failed_identity_write_discards_the_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh-token"
            })))
            .mount(&server)
            .await;

        let memory = MemoryStore::new();
        let flaky = FlakyStore {
            inner: memory.clone(),
            fail_set: Some(USER_KEY),
            ..Default::default()
        };
        let store = store_over(flaky, &server.uri());
        store.restore().await;

        let err = store.login("alice", "secret123").await.unwrap_err();

        match err {
            Error::Auth(AuthError::LoginFailed { message, .. }) => {
                assert_eq!(message, AuthError::LOGIN_FALLBACK);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.current().phase(), Phase::Unauthenticated);
        assert!(memory.is_empty().await);
    }
}
