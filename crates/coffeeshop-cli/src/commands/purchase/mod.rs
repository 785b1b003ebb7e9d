//! Purchase subcommands.

mod buy;
mod history;

use anyhow::Result;
use clap::{Args, Subcommand};

use coffeeshop_http::SessionStore;

#[derive(Args, Debug)]
pub struct PurchaseCommand {
    #[command(subcommand)]
    pub command: PurchaseSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PurchaseSubcommand {
    /// Buy a coffee
    Buy(buy::BuyArgs),

    /// Show your purchase history
    History(history::HistoryArgs),
}

pub async fn handle(cmd: PurchaseCommand, session: &SessionStore) -> Result<()> {
    match cmd.command {
        PurchaseSubcommand::Buy(args) => buy::run(args, session).await,
        PurchaseSubcommand::History(args) => history::run(args, session).await,
    }
}
