//! List coffees command implementation.

use anyhow::Result;
use clap::Args;

use coffeeshop_http::SessionStore;

use crate::commands::describe;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the raw JSON list
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, session: &SessionStore) -> Result<()> {
    let coffees = session
        .client()
        .list_coffees()
        .await
        .map_err(|e| describe(e, "Failed to list coffees"))?;

    if args.json {
        return output::json_pretty(&coffees);
    }

    if coffees.is_empty() {
        output::hint("No coffees available.");
        return Ok(());
    }

    for coffee in &coffees {
        output::coffee(coffee);
    }

    Ok(())
}
