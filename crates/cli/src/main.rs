//! Seastack CLI - drive the storefront SDK against a live commerce endpoint.
//!
//! # Usage
//!
//! ```bash
//! # List the product catalog
//! seastack products --currency NOK --country NO
//!
//! # Run a scripted add-to-cart → checkout → payment-initiation flow
//! seastack checkout --product-id 42 --country NO --email kari@example.com
//! ```
//!
//! # Commands
//!
//! - `products` - list the catalog for a currency/country pair
//! - `checkout` - run the full checkout workflow with a demo address and
//!   print the payment redirect URL

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seastack_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "seastack")]
#[command(author, version, about = "Seastack storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Products {
        /// ISO 4217 currency code (defaults to the configured currency)
        #[arg(short, long)]
        currency: Option<String>,

        /// ISO 3166-1 alpha-2 shipping country (defaults to the configured country)
        #[arg(short = 'k', long)]
        country: Option<String>,
    },
    /// Run the checkout workflow end to end
    Checkout(commands::checkout::CheckoutArgs),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "seastack_storefront=info,seastack=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products { currency, country } => {
            commands::products::list(&config, currency, country).await?;
        }
        Commands::Checkout(args) => {
            commands::checkout::run(&config, args).await?;
        }
    }
    Ok(())
}
