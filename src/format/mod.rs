//! Output formatting for books and summaries (table, JSON, markdown, CSV).

use crate::catalog::Book;
use crate::config::OutputFormat;
use crate::summary::Summary;
use anyhow::{Context, Result};

/// Formats books and summaries for terminal output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a list of books.
    pub fn format_books(&self, books: &[Book]) -> Result<String> {
        if books.is_empty() {
            return Ok(match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Book::HEADERS.join(","),
                _ => "No books found.".to_string(),
            });
        }

        match self.format {
            OutputFormat::Json => self.json_books(books),
            OutputFormat::Table => Ok(self.table_books(books)),
            OutputFormat::Markdown => Ok(self.markdown_books(books)),
            OutputFormat::Csv => self.csv_books(books),
        }
    }

    /// Formats summary metrics followed by the listed books.
    ///
    /// `filters` are the active filter descriptions; `books` is the
    /// (already truncated) listing to show under the metrics.
    pub fn format_report(
        &self,
        summary: &Summary,
        filters: &[String],
        books: &[Book],
    ) -> Result<String> {
        let output = match self.format {
            OutputFormat::Json => {
                let report = serde_json::json!({
                    "summary": summary,
                    "filters": filters,
                    "books": books,
                });
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            }
            OutputFormat::Csv => self.format_books(books)?,
            OutputFormat::Table => {
                let listing = self.format_books(books)?;
                format!("{}\n\n{}", self.table_summary(summary, filters), listing)
            }
            OutputFormat::Markdown => {
                let listing = self.format_books(books)?;
                format!("{}\n\n{}", self.markdown_summary(summary, filters), listing)
            }
        };

        Ok(output)
    }

    // JSON formatting

    fn json_books(&self, books: &[Book]) -> Result<String> {
        serde_json::to_string_pretty(books).context("Failed to serialize books")
    }

    // Table formatting

    fn table_summary(&self, summary: &Summary, filters: &[String]) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Books:        {}", summary.count));
        lines.push(format!("Avg price:    {}", fmt_price(summary.average_price)));
        lines.push(format!(
            "Price range:  {} - {}",
            fmt_price(summary.min_price),
            fmt_price(summary.max_price)
        ));
        lines.push(format!(
            "Avg rating:   {}",
            summary.average_rating.map(|r| format!("{:.2}", r)).unwrap_or_else(|| "N/A".into())
        ));
        lines.push(format!("In stock:     {}", summary.in_stock));

        let breakdown: Vec<String> = summary
            .rating_breakdown
            .iter()
            .enumerate()
            .map(|(idx, n)| format!("{}★ {}", idx + 1, n))
            .collect();
        lines.push(format!("Ratings:      {}", breakdown.join("  ")));

        if !filters.is_empty() {
            lines.push(format!("Filters:      {}", filters.join(", ")));
        }

        lines.join("\n")
    }

    fn table_books(&self, books: &[Book]) -> String {
        let price_width = 10;
        let rating_width = 6;
        let stock_width = 8;
        let title_width = 60;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<price_width$}  {:<rating_width$}  {:<stock_width$}  {}",
            "Price", "Rating", "Stock", "Title"
        ));
        lines.push(format!(
            "{:-<price_width$}  {:-<rating_width$}  {:-<stock_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        for book in books {
            let rating_str = book.stars().map(|s| s.to_string()).unwrap_or_else(|| "N/A".into());
            let stock_str = if book.in_stock() { "Yes" } else { "No" };

            lines.push(format!(
                "{:>price_width$}  {:>rating_width$}  {:<stock_width$}  {}",
                book.price,
                rating_str,
                stock_str,
                book.short_title()
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} books", books.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_summary(&self, summary: &Summary, filters: &[String]) -> String {
        let mut lines = Vec::new();

        lines.push("## Summary".to_string());
        lines.push(String::new());
        lines.push(format!("- **Books:** {}", summary.count));
        lines.push(format!("- **Avg price:** {}", fmt_price(summary.average_price)));
        lines.push(format!(
            "- **Avg rating:** {}",
            summary.average_rating.map(|r| format!("{:.2}", r)).unwrap_or_else(|| "N/A".into())
        ));
        lines.push(format!("- **In stock:** {}", summary.in_stock));

        if !filters.is_empty() {
            lines.push(format!("- **Filters:** {}", filters.join(", ")));
        }

        lines.join("\n")
    }

    fn markdown_books(&self, books: &[Book]) -> String {
        let mut lines = Vec::new();

        lines.push("| Price | Rating | Availability | Title |".to_string());
        lines.push("|-------|--------|--------------|-------|".to_string());

        for book in books {
            let title = book.short_title().replace('|', "\\|");
            let title = if book.image_url.is_empty() {
                title
            } else {
                format!("[{}]({})", title, book.image_url)
            };

            lines.push(format!(
                "| {} | {} | {} | {} |",
                book.price, book.rating, book.availability, title
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} books found*", books.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_books(&self, books: &[Book]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record(Book::HEADERS)?;
        for book in books {
            writer.write_record(book.fields())?;
        }

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        let text = String::from_utf8(bytes).context("CSV output is not valid UTF-8")?;
        Ok(text.trim_end().to_string())
    }
}

fn fmt_price(price: Option<f64>) -> String {
    price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "N/A".to_string())
}
