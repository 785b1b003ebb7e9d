//! Buy command implementation.

use anyhow::{Context, Result};
use clap::Args;

use coffeeshop_core::NewPurchase;
use coffeeshop_http::SessionStore;

use crate::commands::describe;
use crate::output;

#[derive(Args, Debug)]
pub struct BuyArgs {
    /// Id of the coffee to buy
    #[arg(long)]
    pub coffee_id: i64,

    /// Number of units
    #[arg(long, default_value_t = 1)]
    pub quantity: i64,
}

pub async fn run(args: BuyArgs, session: &SessionStore) -> Result<()> {
    session
        .require_session()
        .map_err(|e| describe(e, "Cannot purchase"))?;

    let purchase = NewPurchase {
        coffee_id: args.coffee_id,
        quantity: args.quantity,
    };
    purchase.validate().context("Invalid purchase")?;

    let created = session
        .client()
        .create_purchase(&purchase)
        .await
        .map_err(|e| describe(e, "Failed to purchase"))?;

    output::success(&format!(
        "Purchased {} x {} for ${:.2}",
        created.quantity,
        created
            .coffee_name
            .as_deref()
            .unwrap_or("coffee"),
        created.total_price
    ));

    Ok(())
}
