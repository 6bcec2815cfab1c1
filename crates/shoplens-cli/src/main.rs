use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shoplens_api::{Backend, FileSessionStorage, SessionStore};
use shoplens_core::load_app_config;

mod commands;
mod render;

#[derive(Debug, Parser)]
#[command(name = "shoplens")]
#[command(about = "Shop analytics dashboard command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in and persist the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and clear the persisted session.
    Logout,
    /// Show the authenticated user's profile.
    Whoami,
    /// Show the headline dashboard counters.
    Dashboard,
    /// List products, optionally narrowed by a search term.
    Products {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Merged daily sales series over an inclusive date window.
    Sales {
        /// Window start, YYYY-MM-DD.
        #[arg(long)]
        start: chrono::NaiveDate,
        /// Window end, YYYY-MM-DD.
        #[arg(long)]
        end: chrono::NaiveDate,
    },
    /// Customer table with grade filter, sorting, and paging.
    Customers {
        /// Grade label or ALL.
        #[arg(long, default_value = "ALL")]
        grade: String,
        /// name | purchases | points | first | recent.
        #[arg(long, default_value = "recent")]
        sort: String,
        #[arg(long)]
        ascending: bool,
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Per-grade customer distribution.
    Grades,
    /// Review list, optionally narrowed by rating and catalog codes.
    Reviews {
        /// Star rating 1-5.
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long = "product-id")]
        product_ids: Vec<i64>,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Review keyword cloud, shop-wide or for one product.
    Keywords {
        #[arg(long = "product-id")]
        product_id: Option<String>,
    },
    /// Repurchase analysis.
    #[command(subcommand)]
    Repurchase(commands::RepurchaseCommands),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    tracing::debug!(mode = %config.api_mode, "configuration loaded");

    let session = SessionStore::new(Box::new(FileSessionStorage::new(
        config.session_path.clone(),
    )));
    session.rehydrate().await?;

    let backend = Backend::from_config(&config, session)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Login { email, password } => commands::login(&backend, &email, &password).await,
        Commands::Logout => commands::logout(&backend).await,
        Commands::Whoami => commands::whoami(&backend).await,
        Commands::Dashboard => commands::dashboard(&backend).await,
        Commands::Products { search, page } => {
            commands::products(&backend, search.as_deref(), page).await
        }
        Commands::Sales { start, end } => commands::sales(&backend, start, end).await,
        Commands::Customers {
            grade,
            sort,
            ascending,
            page,
        } => commands::customers(&backend, &grade, &sort, ascending, page).await,
        Commands::Grades => commands::grades(&backend).await,
        Commands::Reviews {
            rating,
            product_ids,
            page,
        } => commands::reviews(&backend, rating, &product_ids, page).await,
        Commands::Keywords { product_id } => {
            commands::keywords(&backend, product_id.as_deref()).await
        }
        Commands::Repurchase(cmd) => commands::repurchase(&backend, cmd).await,
    }
}
