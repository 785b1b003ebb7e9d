//! Command implementations.

pub mod account;
pub mod coffee;
pub mod purchase;

use anyhow::{Result, anyhow};

use coffeeshop_core::Error;
use coffeeshop_core::error::AuthError;

use crate::cli::{Cli, Commands};
use crate::session;

pub async fn handle(cli: Cli) -> Result<()> {
    let session = session::open(&cli.api).await?;

    match cli.command {
        Commands::Login(args) => account::login::run(args, &session).await,
        Commands::Register(args) => account::register::run(args, &session).await,
        Commands::Logout(args) => account::logout::run(args, &session).await,
        Commands::Whoami(args) => account::whoami::run(args, &session).await,
        Commands::Coffee(cmd) => coffee::handle(cmd, &session).await,
        Commands::Purchase(cmd) => purchase::handle(cmd, &session).await,
    }
}

/// Turn a library error into a CLI error with a useful hint.
pub fn describe(err: Error, action: &str) -> anyhow::Error {
    match err {
        Error::Unauthorized(_) => {
            anyhow!("{action}: session expired or invalid. Run 'coffeeshop login' again.")
        }
        Error::Auth(AuthError::NotAuthenticated) => {
            anyhow!("{action}: no active session. Run 'coffeeshop login' first.")
        }
        Error::Auth(AuthError::AdminRequired) => {
            anyhow!("{action}: this command requires an administrator account.")
        }
        Error::Auth(
            AuthError::LoginFailed { message, .. } | AuthError::RegistrationFailed { message, .. },
        ) => anyhow!("{action}: {message}"),
        err => {
            let message = err.server_message().map(str::to_string);
            match message {
                Some(message) => anyhow!("{action}: {message}"),
                None => anyhow::Error::new(err).context(action.to_string()),
            }
        }
    }
}
