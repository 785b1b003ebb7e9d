//! Register command implementation.
//!
//! Creates the account and then logs in with the same credentials.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use coffeeshop_core::RegisterRequest;
use coffeeshop_http::SessionStore;

use crate::commands::describe;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Email address for the new account
    #[arg(long)]
    pub email: String,

    /// Password for the new account
    #[arg(long, env = "COFFEESHOP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Request an administrator account
    #[arg(long)]
    pub admin: bool,
}

pub async fn run(args: RegisterArgs, session: &SessionStore) -> Result<()> {
    let mut request = RegisterRequest::new(&args.username, &args.email, &args.password);
    if args.admin {
        request = request.with_admin(true);
    }
    request.validate().context("Invalid registration")?;

    eprintln!("{}", "Creating account...".dimmed());

    let state = session
        .register(&request)
        .await
        .map_err(|e| describe(e, "Failed to register"))?;

    output::success("Account created and logged in");
    println!();
    output::field("Username", state.username().unwrap_or_default());
    output::field("Email", &args.email);

    Ok(())
}
