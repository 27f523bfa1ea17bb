//! Summary command: metrics and filtered listings over a crawled CSV.

use crate::catalog::Book;
use crate::config::OutputFormat;
use crate::filters::{Availability, FilterChainBuilder};
use crate::format::Formatter;
use crate::output;
use crate::summary::Summary;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Options for the summary command.
#[derive(Debug, Clone, Default)]
pub struct SummaryOptions {
    /// CSV written by a previous crawl
    pub input: PathBuf,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Star counts to keep
    pub ratings: Option<Vec<u8>>,
    pub availability: Availability,
    /// Case-insensitive title search
    pub search: Option<String>,
    /// Maximum number of books to list
    pub max: usize,
    pub format: OutputFormat,
    /// Where to write the filtered books, if anywhere
    pub export: Option<PathBuf>,
}

/// Loads a crawl result, filters it and reports aggregate metrics.
pub struct SummaryCommand {
    options: SummaryOptions,
}

impl SummaryCommand {
    /// Creates a new summary command.
    pub fn new(options: SummaryOptions) -> Self {
        Self { options }
    }

    /// Executes the summary and returns formatted output.
    pub fn execute(&self) -> Result<String> {
        let books = output::read_books(&self.options.input).with_context(|| {
            format!("Could not load '{}'. Run a crawl first", self.options.input.display())
        })?;

        self.execute_with_books(books)
    }

    /// Executes the summary over already loaded books (for testing).
    pub fn execute_with_books(&self, books: Vec<Book>) -> Result<String> {
        let opts = &self.options;
        let total = books.len();

        let filters = FilterChainBuilder::new()
            .price_range(opts.min_price, opts.max_price)
            .ratings(opts.ratings.clone())
            .availability(opts.availability)
            .title_search(opts.search.clone())
            .build();

        let descriptions = filters.descriptions();
        if !filters.is_empty() {
            debug!("Active filters: {}", descriptions.join(", "));
        }

        let filtered = filters.apply(books);
        info!("{} of {} books match", filtered.len(), total);

        if let Some(export) = &opts.export {
            output::write_books(&filtered, export).context("Failed to export filtered books")?;
        }

        let summary = Summary::from_books(&filtered);
        let shown = &filtered[..filtered.len().min(opts.max)];

        let formatter = Formatter::new(opts.format);
        formatter.format_report(&summary, &descriptions, shown)
    }
}
