//! API paths and wire-only response types.

use serde::Deserialize;

/// POST: exchange username and password for a credential.
pub const AUTH_LOGIN: &str = "/auth/login";

/// POST: create an account.
pub const AUTH_REGISTER: &str = "/auth/register";

/// GET lists, POST creates.
pub const COFFEE: &str = "/coffee/";

/// GET lists the caller's purchases, POST creates one.
pub const PURCHASE: &str = "/purchase/";

/// PUT and DELETE target a single coffee.
pub fn coffee_item(id: i64) -> String {
    format!("/coffee/{}", id)
}

/// Error body returned by the API alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
