//! Purchase history command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use coffeeshop_http::SessionStore;

use crate::commands::describe;
use crate::output;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Print the raw JSON list
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: HistoryArgs, session: &SessionStore) -> Result<()> {
    session
        .require_session()
        .map_err(|e| describe(e, "Cannot show history"))?;

    let purchases = session
        .client()
        .purchase_history()
        .await
        .map_err(|e| describe(e, "Failed to load purchase history"))?;

    if args.json {
        return output::json_pretty(&purchases);
    }

    if purchases.is_empty() {
        output::hint("No purchases yet.");
        return Ok(());
    }

    for purchase in &purchases {
        output::purchase(purchase);
    }

    let total: f64 = purchases.iter().map(|p| p.total_price).sum();
    eprintln!();
    eprintln!("{}: ${:.2}", "Total spent".dimmed(), total);

    Ok(())
}
