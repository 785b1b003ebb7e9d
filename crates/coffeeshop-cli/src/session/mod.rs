//! Session bootstrap for CLI commands.

pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use coffeeshop_http::{ApiClient, ApiConfig, SessionStore};

use crate::cli::ApiArgs;

/// Build the pipeline and session store, and restore the saved session.
pub async fn open(api: &ApiArgs) -> Result<SessionStore> {
    let config = ApiConfig::from_address(&api.api_url)
        .context("Invalid API URL")?
        .with_timeout_ms(api.timeout_ms);

    let store = storage::open_store()?;
    debug!(path = %store.path().display(), api = %config.base_address, "Opening session");
    let client = ApiClient::new(config, Arc::new(store)).context("Failed to create API client")?;

    let session = SessionStore::new(client);
    let restored = session.restore().await;
    debug!(phase = ?restored.phase(), "Session restored");
    Ok(session)
}
