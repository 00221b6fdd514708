//! GameArena CLI - Browse the catalog and manage the local cart.
//!
//! # Usage
//!
//! ```bash
//! # List products, cheapest first
//! ga-cli products --sort price-low
//!
//! # Search within a category
//! ga-cli products --search controller --category consoles
//!
//! # Add two units of a product to the cart
//! ga-cli add 64f1c0ffee --quantity 2
//!
//! # Show the cart
//! ga-cli cart
//! ```
//!
//! # Commands
//!
//! - `products` - List, search, filter and sort the catalog
//! - `suggest` - Search-box suggestions for a term
//! - `product` - Show a single product
//! - `add` / `remove` / `set` / `clear` - Change the cart
//! - `cart` - Show the cart
//!
//! The cart lives under `GAMEARENA_STORAGE_DIR` and survives between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use gamearena_storefront::catalog::{CatalogClient, SortOrder};
use gamearena_storefront::config::StorefrontConfig;
use gamearena_storefront::error::AppError;
use gamearena_storefront::storage::FileStorage;
use gamearena_storefront::{InitOutcome, ShopSession};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "ga-cli")]
#[command(author, version, about = "GameArena shop client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Case-insensitive match against name and description
        #[arg(short, long)]
        search: Option<String>,

        /// Category id (`all` for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Ordering (`featured`, `price-low`, `price-high`, `name`)
        #[arg(long, default_value_t = SortOrder::Featured)]
        sort: SortOrder,
    },
    /// Suggest product names for a search term
    Suggest { term: String },
    /// Show one product
    Product { id: String },
    /// Add a product to the cart
    Add {
        id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove { id: String },
    /// Set the quantity of a cart line (zero or less removes it)
    Set {
        id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Show the cart
    Cart,
}

/// Initialize Sentry error tracking when a DSN is configured.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gamearena_storefront=info,ga_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        if e.is_user_error() {
            tracing::info!("{e}");
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), AppError> {
    let catalog = CatalogClient::new(&config.catalog)?;

    match cli.command {
        Commands::Products {
            search,
            category,
            sort,
        } => {
            commands::catalog::list(&catalog, search.as_deref(), category.as_deref(), sort)
                .await?;
        }
        Commands::Suggest { term } => commands::catalog::suggest(&catalog, &term).await?,
        Commands::Product { id } => commands::catalog::show(&catalog, &id.into()).await?,
        cart_command => {
            let mut session = ShopSession::new(FileStorage::new(&config.storage_dir), catalog);
            if let InitOutcome::Discarded { reason } = session.init_outcome() {
                tracing::warn!(%reason, "Stored cart was unreadable and has been reset");
            }

            match cart_command {
                Commands::Add { id, quantity } => {
                    commands::cart::add(&mut session, &id.into(), quantity).await?;
                }
                Commands::Remove { id } => commands::cart::remove(&mut session, &id.into()),
                Commands::Set { id, quantity } => {
                    commands::cart::set(&mut session, &id.into(), quantity);
                }
                Commands::Clear => commands::cart::clear(&mut session),
                _ => {}
            }
            commands::cart::show(&session);
        }
    }
    Ok(())
}
