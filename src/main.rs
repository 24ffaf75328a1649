use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use storefront_scraper::{
    web::{self, AppState},
    AppConfig, ChromeLauncher, ProductScraper, ScrapedProduct, SessionLauncher, StaticPage,
};

#[derive(Parser)]
#[command(name = "storefront-scraper", version, about = "Extract product data from store pages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Scrape one URL with headless Chrome and print the result as JSON
    Scrape { url: String },
    /// Run extraction over a saved HTML file
    Extract {
        #[arg(long)]
        html: PathBuf,
        /// URL the page was saved from; drives platform detection
        #[arg(long)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("storefront_scraper=debug".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting Storefront Scraper...");
            for store in storefront_scraper::platform::supported_stores() {
                info!(store, "Supported store");
            }
            web::serve(AppState::new(config)).await?;
        }
        Command::Scrape { url } => {
            let launcher = ChromeLauncher::new(config.scraper.clone());
            let scraper = ProductScraper::new(config.scraper);
            let product = tokio::task::spawn_blocking(move || {
                let mut page = launcher.open()?;
                scraper.scrape(page.as_mut(), &url)
            })
            .await??;
            print_product(&product)?;
        }
        Command::Extract { html, url } => {
            let markup = std::fs::read_to_string(&html)
                .with_context(|| format!("Failed to read {}", html.display()))?;
            let scraper = ProductScraper::new(config.scraper);
            let product = tokio::task::spawn_blocking(move || {
                let mut page = StaticPage::new(url.clone(), markup);
                scraper.scrape(&mut page, &url)
            })
            .await??;
            print_product(&product)?;
        }
    }

    Ok(())
}

fn print_product(product: &ScrapedProduct) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(product)?);
    Ok(())
}
