//! coffeeshop-core - Core types and traits for the coffee shop client.

pub mod credentials;
pub mod error;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use session::{Phase, Session};
pub use tokens::AuthToken;
pub use traits::{
    InvalidationListener, InvalidationReason, KeyValueStore, SharedStore, TOKEN_KEY, USER_KEY,
};
pub use types::{
    ApiUrl, AuthResponse, Coffee, CoffeePatch, Identity, MessageResponse, NewCoffee, NewPurchase,
    Purchase, RegisterRequest,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
