//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use coffeeshop_http::SessionStore;

use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, session: &SessionStore) -> Result<()> {
    let was_logged_in = session.current().is_authenticated();
    session.logout().await;

    if was_logged_in {
        output::success("Logged out");
    } else {
        output::hint("No active session.");
    }

    Ok(())
}
