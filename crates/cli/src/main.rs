//! Palisade CLI - Local cart and catalog seeding.
//!
//! # Usage
//!
//! ```bash
//! # Seed the catalog from a YAML file
//! palisade seed products.yaml
//!
//! # Work with a local cart
//! palisade cart add --id p1 --name "Vinyl Picket" --price 45.00
//! palisade cart set p1 3
//! palisade cart show
//! palisade --cart-file /tmp/other.json cart clear
//! ```
//!
//! # Commands
//!
//! - `seed` - Seed the product catalog
//! - `cart` - Manage a cart stored in a local file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod storage;

use commands::cart::CartCommand;

#[derive(Parser)]
#[command(name = "palisade")]
#[command(author, version, about = "Palisade CLI tools")]
struct Cli {
    /// Cart file used by `cart` commands
    #[arg(
        long,
        global = true,
        env = "PALISADE_CART_FILE",
        default_value = storage::DEFAULT_CART_FILE
    )]
    cart_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the product catalog from a YAML file
    Seed {
        /// Path to the YAML file
        file: PathBuf,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product name
        #[arg(long)]
        name: String,

        /// Unit price, e.g. 45.00
        #[arg(long)]
        price: String,

        /// Product image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove a product's line
    Remove {
        /// Product ID
        id: String,
    },
    /// Set a line's quantity (0 or less removes it)
    Set {
        /// Product ID
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

impl From<CartAction> for CartCommand {
    fn from(action: CartAction) -> Self {
        match action {
            CartAction::Show => Self::Show,
            CartAction::Add {
                id,
                name,
                price,
                image,
            } => Self::Add {
                id,
                name,
                price,
                image,
            },
            CartAction::Remove { id } => Self::Remove { id },
            CartAction::Set { id, quantity } => Self::Set { id, quantity },
            CartAction::Clear => Self::Clear,
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { file } => commands::seed::products(&file).await?,
        Commands::Cart { action } => commands::cart::run(action.into(), &cli.cart_file)?,
    }
    Ok(())
}
