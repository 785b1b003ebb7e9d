//! Core traits for persistence and session invalidation.

mod listener;
mod store;

pub use listener::{InvalidationListener, InvalidationReason};
pub use store::{KeyValueStore, SharedStore, TOKEN_KEY, USER_KEY};
