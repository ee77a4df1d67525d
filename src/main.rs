use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use app_review_scraper_lib::application::AppState;
use app_review_scraper_lib::infrastructure::logging::{init_logging_with_config, log_system_info};
use app_review_scraper_lib::infrastructure::ConfigManager;
use app_review_scraper_lib::scrape_app_with_cancellation;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Scrape recent app-store reviews into SQLite", long_about = None)]
struct Cli {
    /// Use this configuration file instead of the default location
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the stored reviews for an app with a fresh scrape
    Scrape {
        /// App name from the catalog (see `apps`)
        app: String,

        /// Override the page safety limit
        #[arg(long)]
        max_pages: Option<u32>,

        /// Never substitute sample reviews for unreadable pages
        #[arg(long)]
        no_fallback: bool,
    },

    /// List the apps that can be scraped
    Apps,

    /// Show configuration
    Config {
        /// Print the configuration file path
        #[arg(long, conflicts_with = "show")]
        path: bool,

        /// Print the effective configuration as JSON
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };

    if let Commands::Config { path: true, .. } = cli.command {
        println!("{}", manager.config_path().display());
        return Ok(());
    }

    let mut config = manager.load_config().await?;

    match cli.command {
        Commands::Config { .. } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Apps => {
            println!("{}", serde_json::to_string_pretty(&config.app_names())?);
        }
        Commands::Scrape {
            app,
            max_pages,
            no_fallback,
        } => {
            if let Some(max_pages) = max_pages {
                config.scraper.max_pages = max_pages;
            }
            if no_fallback {
                config.scraper.use_fallback_samples = false;
            }
            config.validate()?;

            init_logging_with_config(&config.logging)?;
            log_system_info();

            let state = AppState::initialize(config).await?;

            let token = CancellationToken::new();
            let ctrl_c_token = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupt received, stopping after the current page");
                    ctrl_c_token.cancel();
                }
            });

            let response = scrape_app_with_cancellation(&state, &app, token).await;
            info!("{}", response.message.as_deref().unwrap_or_default());
            println!("{}", serde_json::to_string_pretty(&response)?);

            if !response.success {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
