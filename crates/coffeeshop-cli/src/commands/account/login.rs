//! Login command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use coffeeshop_http::SessionStore;

use crate::commands::describe;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "COFFEESHOP_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, session: &SessionStore) -> Result<()> {
    eprintln!("{}", "Logging in...".dimmed());

    let state = session
        .login(&args.username, &args.password)
        .await
        .map_err(|e| describe(e, "Failed to login"))?;

    output::success("Logged in successfully");
    println!();
    output::field("Username", state.username().unwrap_or_default());
    output::field("Admin", if state.is_admin() { "yes" } else { "no" });
    output::field("API", session.client().base_address().as_str());

    Ok(())
}
