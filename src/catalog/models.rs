//! Data models for catalog records and parsed listing pages.

use serde::{Deserialize, Serialize};
use url::Url;

/// Rank words used by the catalog's star rating markup, in ascending order.
pub const RATING_WORDS: [&str; 5] = ["One", "Two", "Three", "Four", "Five"];

/// One catalog entry as extracted from an item card.
///
/// Every field is kept as the display string found in the markup. Missing
/// markup yields an empty string rather than an absent value, so a record
/// always has all five columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "Book Title", default)]
    pub title: String,
    /// Currency-prefixed price, e.g. `£51.77`
    #[serde(rename = "Book Price", default)]
    pub price: String,
    /// Free-form stock description, e.g. `In stock (22 available)`
    #[serde(rename = "Instock Availability", default)]
    pub availability: String,
    /// One of [`RATING_WORDS`], or empty
    #[serde(rename = "Rating", default)]
    pub rating: String,
    /// Absolute cover image URL
    #[serde(rename = "Image URL", default)]
    pub image_url: String,
}

impl Book {
    /// CSV header row, in column order.
    pub const HEADERS: [&'static str; 5] =
        ["Book Title", "Book Price", "Instock Availability", "Rating", "Image URL"];

    /// Returns the fields in column order.
    pub fn fields(&self) -> [&str; 5] {
        [&self.title, &self.price, &self.availability, &self.rating, &self.image_url]
    }

    /// Parses the display price into a number, ignoring currency symbols.
    pub fn price_value(&self) -> Option<f64> {
        let cleaned: String = self
            .price
            .replace('Â', "")
            .chars()
            .filter(|c| !matches!(c, '£' | '$' | '€' | ','))
            .collect();
        let cleaned = cleaned.trim();

        if let Ok(value) = cleaned.parse() {
            return Some(value);
        }

        first_number(cleaned)
    }

    /// Returns the star count (1-5) for the rating word.
    pub fn stars(&self) -> Option<u8> {
        let lower = self.rating.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }

        for (idx, word) in RATING_WORDS.iter().enumerate() {
            if lower.contains(&word.to_lowercase()) {
                return Some(idx as u8 + 1);
            }
        }

        let digits: String = lower
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok().filter(|n| (1..=5).contains(n))
    }

    /// Returns true if the availability text reports stock.
    ///
    /// Loose match used for filtering: any mention of "available" counts.
    pub fn in_stock(&self) -> bool {
        let lower = self.availability.to_lowercase();
        lower.contains("in stock") || lower.contains("available")
    }

    /// Returns true if the availability text literally says "in stock".
    pub fn says_in_stock(&self) -> bool {
        self.availability.to_lowercase().contains("in stock")
    }

    /// Title shortened for display (60 chars max).
    pub fn short_title(&self) -> String {
        if self.title.chars().count() <= 60 {
            self.title.clone()
        } else {
            let head: String = self.title.chars().take(57).collect();
            format!("{}...", head)
        }
    }
}

/// First `\d+(\.\d+)?` run in `text`.
fn first_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];

    let mut end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if rest[end..].starts_with('.') {
        let frac = &rest[end + 1..];
        let frac_len = frac.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac.len());
        if frac_len > 0 {
            end += 1 + frac_len;
        }
    }

    rest[..end].parse().ok()
}

/// Everything extracted from one listing page.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    /// URL the page was served from (base for relative links)
    pub url: Url,
    /// Records in document order
    pub books: Vec<Book>,
    /// Absolute URL of the next listing page, if any
    pub next: Option<Url>,
}

impl CatalogPage {
    /// Returns number of records on the page.
    pub fn count(&self) -> usize {
        self.books.len()
    }

    /// Returns true if this is the last page of the chain.
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}
