//! Shopfront CLI - Catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! shopfront-cli products list
//!
//! # Create a product
//! shopfront-cli products create -t "Widget" -p 10.00
//!
//! # Delete a product
//! shopfront-cli products delete 7
//! ```
//!
//! # Commands
//!
//! - `products list` - Print the catalog
//! - `products create` - Create a product
//! - `products delete` - Delete a product by id

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shopfront_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "shopfront-cli")]
#[command(author, version, about = "Shopfront CLI tools")]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "SHOPFRONT_API_URL", default_value = "http://localhost:3001")]
    api_url: String,

    /// Storefront access token sent when creating products
    #[arg(long, env = "SHOPFRONT_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage catalog products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List,
    /// Create a new product
    Create {
        /// Product title
        #[arg(short, long)]
        title: String,

        /// Product price
        #[arg(short, long)]
        price: Decimal,

        /// Product description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Mark the product as unavailable
        #[arg(long)]
        unavailable: bool,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: ProductId,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads env-backed arguments
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = commands::products::client(&cli.api_url, cli.access_token)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(&client).await?,
            ProductAction::Create {
                title,
                price,
                description,
                unavailable,
            } => {
                let product =
                    commands::products::new_product(&title, &description, price, unavailable)?;
                commands::products::create(&client, &product).await?;
            }
            ProductAction::Delete { id } => commands::products::delete(&client, id).await?,
        },
    }
    Ok(())
}
