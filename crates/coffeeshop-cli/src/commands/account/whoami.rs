//! Whoami command implementation.

use anyhow::Result;
use clap::Args;

use coffeeshop_http::SessionStore;

use crate::commands::describe;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, session: &SessionStore) -> Result<()> {
    let identity = session
        .require_session()
        .map_err(|e| describe(e, "Cannot show session"))?;

    output::field("Username", &identity.username);
    if !identity.email.is_empty() {
        output::field("Email", &identity.email);
    }
    output::field("Admin", if identity.is_admin { "yes" } else { "no" });
    output::field("Since", &identity.created_at);
    output::field("API", session.client().base_address().as_str());

    Ok(())
}
