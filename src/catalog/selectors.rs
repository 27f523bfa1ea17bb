//! CSS selectors for catalog listing pages.
//!
//! Defaults match the books.toscrape.com layout. Every pattern can be
//! overridden from the `[selectors]` table of the config file.
//!
//! **Update process**: when extraction comes back empty, capture an HTML
//! sample, update the defaults here, and extend the parser fixture.

use crate::error::CrawlError;
use scraper::Selector;
use serde::{Deserialize, Serialize};

/// Item card container.
pub const CARD: &str = "article.product_pod";
/// Title link; the title is read from its `title` attribute.
pub const TITLE: &str = "h3 a";
pub const PRICE: &str = "p.price_color";
pub const AVAILABILITY: &str = "p.instock.availability";
/// Rating element; the rank word is a class next to [`RATING_MARKER_CLASS`].
pub const RATING: &str = "p.star-rating";
pub const IMAGE: &str = "div.image_container a img";
/// Pagination link to the following page.
pub const NEXT_PAGE: &str = "li.next a";

/// Class that marks the rating element and is not part of the rank word.
pub const RATING_MARKER_CLASS: &str = "star-rating";

/// Selector patterns as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub card: String,
    pub title: String,
    pub price: String,
    pub availability: String,
    pub rating: String,
    pub image: String,
    pub next_page: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: CARD.to_string(),
            title: TITLE.to_string(),
            price: PRICE.to_string(),
            availability: AVAILABILITY.to_string(),
            rating: RATING.to_string(),
            image: IMAGE.to_string(),
            next_page: NEXT_PAGE.to_string(),
        }
    }
}

/// Compiled selectors used by the parser.
#[derive(Debug, Clone)]
pub struct CatalogSelectors {
    pub card: Selector,
    pub title: Selector,
    pub price: Selector,
    pub availability: Selector,
    pub rating: Selector,
    pub image: Selector,
    pub next_page: Selector,
}

impl CatalogSelectors {
    /// Compiles every pattern, failing on the first one that does not parse.
    pub fn compile(config: &SelectorConfig) -> Result<Self, CrawlError> {
        Ok(Self {
            card: compile(&config.card)?,
            title: compile(&config.title)?,
            price: compile(&config.price)?,
            availability: compile(&config.availability)?,
            rating: compile(&config.rating)?,
            image: compile(&config.image)?,
            next_page: compile(&config.next_page)?,
        })
    }
}

fn compile(pattern: &str) -> Result<Selector, CrawlError> {
    Selector::parse(pattern).map_err(|e| CrawlError::Selector {
        selector: pattern.to_string(),
        reason: e.to_string(),
    })
}
