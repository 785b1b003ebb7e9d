//! Delete coffee command implementation.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use coffeeshop_http::SessionStore;

use crate::commands::describe;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Coffee id
    pub id: i64,

    /// Skip confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn run(args: DeleteArgs, session: &SessionStore) -> Result<()> {
    session
        .require_admin()
        .map_err(|e| describe(e, "Cannot delete coffee"))?;

    if !args.force && !confirm(args.id)? {
        output::hint("Cancelled.");
        return Ok(());
    }

    let response = session
        .client()
        .delete_coffee(args.id)
        .await
        .map_err(|e| describe(e, "Failed to delete coffee"))?;

    let message = if response.message.is_empty() {
        format!("Deleted coffee #{}", args.id)
    } else {
        response.message
    };
    output::success(&message);

    Ok(())
}

fn confirm(id: i64) -> Result<bool> {
    print!("Delete coffee #{}? [y/N] ", id);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
