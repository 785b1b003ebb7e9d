//! Coffee catalogue subcommands.

mod add;
mod delete;
mod edit;
mod list;

use anyhow::Result;
use clap::{Args, Subcommand};

use coffeeshop_http::SessionStore;

#[derive(Args, Debug)]
pub struct CoffeeCommand {
    #[command(subcommand)]
    pub command: CoffeeSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CoffeeSubcommand {
    /// List the catalogue
    List(list::ListArgs),

    /// Add a coffee (admin only)
    Add(add::AddArgs),

    /// Change fields of a coffee (admin only)
    Edit(edit::EditArgs),

    /// Remove a coffee (admin only)
    Delete(delete::DeleteArgs),
}

pub async fn handle(cmd: CoffeeCommand, session: &SessionStore) -> Result<()> {
    match cmd.command {
        CoffeeSubcommand::List(args) => list::run(args, session).await,
        CoffeeSubcommand::Add(args) => add::run(args, session).await,
        CoffeeSubcommand::Edit(args) => edit::run(args, session).await,
        CoffeeSubcommand::Delete(args) => delete::run(args, session).await,
    }
}
