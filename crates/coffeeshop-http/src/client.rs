//! Authenticated HTTP client for the coffee shop API.

use std::sync::{Arc, PoisonError, RwLock, Weak};

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, trace, warn};

use coffeeshop_core::error::{ApiError, Error, TransportError};
use coffeeshop_core::{
    ApiUrl, AuthResponse, AuthToken, Coffee, CoffeePatch, Credentials, InvalidationListener,
    InvalidationReason, MessageResponse, NewCoffee, NewPurchase, Purchase, RegisterRequest,
    Result, SharedStore, TOKEN_KEY, USER_KEY,
};

use crate::config::ApiConfig;
use crate::endpoints::{self, ApiErrorResponse};

/// The single transport for every remote call.
///
/// Before each request the persisted credential is read from the store and,
/// if present, sent as a bearer token. A 401 response removes the persisted
/// session and notifies registered listeners before the error is returned.
///
/// Cheap to clone; clones share the connection pool, store and listeners.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ApiConfig,
    store: SharedStore,
    listeners: RwLock<Vec<Weak<dyn InvalidationListener>>>,
}

impl ApiClient {
    /// Create a client for the configured base address.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ApiConfig, store: SharedStore) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(concat!("coffeeshop/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        if !config.base_address.is_secure() {
            warn!(api = %config.base_address, "API address is plain HTTP on a non-loopback host");
        }

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                store,
                listeners: RwLock::new(Vec::new()),
            }),
        })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Returns the base address requests are sent to.
    pub fn base_address(&self) -> &ApiUrl {
        &self.inner.config.base_address
    }

    /// Returns the store the credential is read from.
    pub fn store(&self) -> &SharedStore {
        &self.inner.store
    }

    /// Register for a callback when a 401 clears the persisted session.
    ///
    /// Only a weak reference is held; listeners that have been dropped are
    /// pruned on the next invalidation.
    pub fn add_listener(&self, listener: Weak<dyn InvalidationListener>) {
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Exchange a username and password for a credential.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        self.send(Method::POST, endpoints::AUTH_LOGIN, Some(credentials))
            .await
    }

    /// Create an account. Does not establish a session.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse> {
        self.send(Method::POST, endpoints::AUTH_REGISTER, Some(request))
            .await
    }

    // ========================================================================
    // Coffee
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn list_coffees(&self) -> Result<Vec<Coffee>> {
        self.send(Method::GET, endpoints::COFFEE, None::<&()>).await
    }

    #[instrument(skip(self, coffee), fields(name = %coffee.name))]
    pub async fn create_coffee(&self, coffee: &NewCoffee) -> Result<Coffee> {
        self.send(Method::POST, endpoints::COFFEE, Some(coffee)).await
    }

    /// Update the fields set in `patch`; the rest are left untouched.
    #[instrument(skip(self, patch))]
    pub async fn update_coffee(&self, id: i64, patch: &CoffeePatch) -> Result<Coffee> {
        self.send(Method::PUT, &endpoints::coffee_item(id), Some(patch))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_coffee(&self, id: i64) -> Result<MessageResponse> {
        self.send(Method::DELETE, &endpoints::coffee_item(id), None::<&()>)
            .await
    }

    // ========================================================================
    // Purchases
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn create_purchase(&self, purchase: &NewPurchase) -> Result<Purchase> {
        self.send(Method::POST, endpoints::PURCHASE, Some(purchase))
            .await
    }

    #[instrument(skip(self))]
    pub async fn purchase_history(&self) -> Result<Vec<Purchase>> {
        self.send(Method::GET, endpoints::PURCHASE, None::<&()>).await
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    async fn send<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.inner.config.base_address.endpoint(path);
        debug!(%method, %url, "API request");

        let mut request = self.inner.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let request = self.authorize(request).await;

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    /// Attach the persisted credential, if any.
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.inner.store.get(TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => {
                trace!("Attaching bearer credential");
                request.header(AUTHORIZATION, AuthToken::new(token).bearer())
            }
            Ok(_) => request,
            Err(e) => {
                warn!(error = %e, "Failed to read credential; sending unauthenticated");
                request
            }
        }
    }

    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            return response.json::<R>().await.map_err(|e| self.transport_error(e));
        }

        let error = Self::parse_error_response(response).await;
        if status == StatusCode::UNAUTHORIZED {
            self.invalidate(InvalidationReason::Unauthorized).await;
            return Err(Error::Unauthorized(error));
        }

        Err(Error::Api(error))
    }

    /// Parse an error body; non-JSON bodies yield a bare status.
    async fn parse_error_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        match response.json::<ApiErrorResponse>().await {
            Ok(body) => ApiError::new(status, body.error, body.message),
            Err(_) => ApiError::new(status, None, None),
        }
    }

    /// Drop the persisted session and tell listeners.
    async fn invalidate(&self, reason: InvalidationReason) {
        info!(?reason, "Clearing persisted session");

        if let Err(e) = self.inner.store.remove_all(&[TOKEN_KEY, USER_KEY]).await {
            warn!(error = %e, "Failed to clear persisted session");
        }

        let listeners: Vec<Arc<dyn InvalidationListener>> = {
            let mut guard = self
                .inner
                .listeners
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            guard.retain(|l| l.strong_count() > 0);
            guard.iter().filter_map(Weak::upgrade).collect()
        };

        for listener in listeners {
            listener.session_invalidated(reason);
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.inner.config.timeout_ms,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        Error::Transport(err)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_address", &self.inner.config.base_address)
            .field("timeout_ms", &self.inner.config.timeout_ms)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use coffeeshop_store::MemoryStore;

    struct Counter(AtomicUsize);

    impl InvalidationListener for Counter {
        fn session_invalidated(&self, _reason: InvalidationReason) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn client() -> ApiClient {
        ApiClient::new(ApiConfig::default(), Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn client_creation() {
        let client = client();
        assert_eq!(client.base_address().host(), Some("localhost"));
        assert_eq!(client.config().timeout_ms, 10_000);
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ApiConfig::default().with_timeout_ms(0);
        assert!(ApiClient::new(config, Arc::new(MemoryStore::new())).is_err());
    }

    #[tokio::test]
    async fn invalidate_notifies_live_listeners_and_prunes_dropped_ones() {
        let client = client();
        let live = Arc::new(Counter(AtomicUsize::new(0)));
        let dropped = Arc::new(Counter(AtomicUsize::new(0)));

        let live_weak: Weak<Counter> = Arc::downgrade(&live);
        let dropped_weak: Weak<Counter> = Arc::downgrade(&dropped);
        client.add_listener(live_weak);
        client.add_listener(dropped_weak);
        drop(dropped);

        client.invalidate(InvalidationReason::Unauthorized).await;

        assert_eq!(live.0.load(Ordering::SeqCst), 1);
        assert_eq!(client.inner.listeners.read().unwrap().len(), 1);
    }
}
