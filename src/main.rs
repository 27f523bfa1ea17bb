//! books-crawler - paginating catalog crawler with CSV export

use anyhow::Result;
use books_crawler::commands::{CrawlCommand, SummaryCommand, SummaryOptions};
use books_crawler::config::{Config, OutputFormat};
use books_crawler::filters::Availability;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "books-crawler",
    version,
    about = "Crawl a paginated book catalog into a CSV file",
    long_about = "Follows the catalog's next-page links from a start URL, extracts title, price, \
                  availability, rating and image URL from every item card, and writes them to a \
                  UTF-8 CSV with byte-order mark."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "BOOKS_PROXY")]
    proxy: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl the catalog and write the CSV (default)
    #[command(alias = "c")]
    Crawl {
        /// First listing page
        #[arg(long)]
        start_url: Option<String>,

        /// CSV destination (overwritten)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Summarize and filter a previously written CSV
    #[command(alias = "s")]
    Summary {
        /// CSV to read (defaults to the configured output)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Minimum price filter
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price filter
        #[arg(long)]
        max_price: Option<f64>,

        /// Star ratings to keep (comma-separated, 1-5)
        #[arg(long, value_delimiter = ',')]
        ratings: Option<Vec<u8>>,

        /// Stock filter: all, in-stock, out-of-stock
        #[arg(long, default_value = "all")]
        availability: Availability,

        /// Title search (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Maximum number of books to list
        #[arg(short, long, default_value = "20")]
        max: usize,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Write the filtered books to this CSV
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    let command =
        cli.command.unwrap_or(Commands::Crawl { start_url: None, output: None, max_pages: None });

    match command {
        Commands::Crawl { start_url, output, max_pages } => {
            if let Some(url) = start_url {
                config.start_url = url;
            }
            if let Some(output) = output {
                config.output = output;
            }
            if max_pages.is_some() {
                config.max_pages = max_pages;
            }

            let report = CrawlCommand::new(config).execute().await?;
            println!("Saved {} books from {} pages", report.books, report.pages);
        }

        Commands::Summary {
            input,
            min_price,
            max_price,
            ratings,
            availability,
            search,
            max,
            format,
            export,
        } => {
            let options = SummaryOptions {
                input: input.unwrap_or_else(|| config.output.clone()),
                min_price,
                max_price,
                ratings,
                availability,
                search,
                max,
                format: format.unwrap_or(config.format),
                export,
            };

            let output = SummaryCommand::new(options).execute()?;
            println!("{}", output);
        }
    }

    Ok(())
}
