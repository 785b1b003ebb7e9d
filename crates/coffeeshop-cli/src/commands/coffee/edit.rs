//! Edit coffee command implementation.
//!
//! Only the flags given are sent; the server keeps every other field.

use anyhow::{Context, Result};
use clap::Args;

use coffeeshop_core::CoffeePatch;
use coffeeshop_http::SessionStore;

use crate::commands::describe;
use crate::output;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Coffee id
    pub id: i64,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New unit price
    #[arg(long)]
    pub price: Option<f64>,

    /// New stock level
    #[arg(long)]
    pub stock: Option<i64>,
}

pub async fn run(args: EditArgs, session: &SessionStore) -> Result<()> {
    session
        .require_admin()
        .map_err(|e| describe(e, "Cannot edit coffee"))?;

    let patch = CoffeePatch {
        name: args.name,
        description: args.description,
        price: args.price,
        stock: args.stock,
    };
    patch.validate().context("Invalid update")?;

    let updated = session
        .client()
        .update_coffee(args.id, &patch)
        .await
        .map_err(|e| describe(e, "Failed to update coffee"))?;

    output::success(&format!("Updated coffee #{}", updated.id));
    output::coffee(&updated);

    Ok(())
}
