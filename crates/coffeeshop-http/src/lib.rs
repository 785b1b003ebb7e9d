//! coffeeshop-http - Authenticated request pipeline and session store.
//!
//! All remote calls go through one [`ApiClient`], which attaches the persisted
//! credential to every request and clears it when the server answers 401.
//! [`SessionStore`] owns the in-memory authentication state on top of it.
//!
//! # Example
//!
//! ```no_run
//! use coffeeshop_core::SharedStore;
//! use coffeeshop_http::{ApiClient, ApiConfig, SessionStore};
//!
//! # async fn example(store: SharedStore) -> Result<(), coffeeshop_core::Error> {
//! let client = ApiClient::new(ApiConfig::default(), store)?;
//! let session = SessionStore::new(client.clone());
//! session.restore().await;
//!
//! if !session.current().is_authenticated() {
//!     session.login("alice", "hunter22").await?;
//! }
//!
//! for coffee in client.list_coffees().await? {
//!     println!("{}: {}", coffee.name, coffee.price);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod endpoints;
mod session;

pub use client::ApiClient;
pub use config::{ApiConfig, DEFAULT_BASE_ADDRESS, DEFAULT_TIMEOUT_MS};
pub use session::SessionStore;
