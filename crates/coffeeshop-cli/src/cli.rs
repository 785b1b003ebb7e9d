//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::{account, coffee, purchase};

/// Command-line client for the coffee shop API.
#[derive(Parser, Debug)]
#[command(name = "coffeeshop")]
#[command(author, version = env!("COFFEESHOP_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and how to reach the API.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// API base URL
    #[arg(
        long,
        global = true,
        env = "COFFEESHOP_API_URL",
        default_value = coffeeshop_http::DEFAULT_BASE_ADDRESS
    )]
    pub api_url: String,

    /// Request timeout in milliseconds
    #[arg(
        long,
        global = true,
        env = "COFFEESHOP_TIMEOUT_MS",
        default_value_t = coffeeshop_http::DEFAULT_TIMEOUT_MS
    )]
    pub timeout_ms: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and save the session
    Login(account::login::LoginArgs),

    /// Create an account and log in
    Register(account::register::RegisterArgs),

    /// Forget the saved session
    Logout(account::logout::LogoutArgs),

    /// Display the saved session
    Whoami(account::whoami::WhoamiArgs),

    /// Browse and manage the coffee catalogue
    Coffee(coffee::CoffeeCommand),

    /// Buy coffee and view purchase history
    Purchase(purchase::PurchaseCommand),
}
