//! Domain types for the coffee shop API.

mod api_url;
mod coffee;
mod identity;
mod purchase;

pub use api_url::ApiUrl;
pub use coffee::{Coffee, CoffeePatch, NewCoffee};
pub use identity::{
    ADMIN_USERNAME, AuthResponse, Identity, MIN_PASSWORD_LEN, MessageResponse, RegisterRequest,
};
pub use purchase::{NewPurchase, Purchase};
