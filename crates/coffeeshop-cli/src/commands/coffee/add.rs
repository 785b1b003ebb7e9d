//! Add coffee command implementation.

use anyhow::{Context, Result};
use clap::Args;

use coffeeshop_core::NewCoffee;
use coffeeshop_http::SessionStore;

use crate::commands::describe;
use crate::output;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Coffee name
    #[arg(long)]
    pub name: String,

    /// Short description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Unit price
    #[arg(long)]
    pub price: f64,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    pub stock: i64,
}

pub async fn run(args: AddArgs, session: &SessionStore) -> Result<()> {
    session
        .require_admin()
        .map_err(|e| describe(e, "Cannot add coffee"))?;

    let coffee = NewCoffee {
        name: args.name,
        description: args.description,
        price: args.price,
        stock: args.stock,
    };
    coffee.validate().context("Invalid coffee")?;

    let created = session
        .client()
        .create_coffee(&coffee)
        .await
        .map_err(|e| describe(e, "Failed to add coffee"))?;

    output::success(&format!("Added coffee #{}", created.id));
    output::coffee(&created);

    Ok(())
}
