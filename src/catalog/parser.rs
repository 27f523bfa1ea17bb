//! HTML parser for catalog listing pages.

use crate::catalog::models::{Book, CatalogPage};
use crate::catalog::selectors::{CatalogSelectors, RATING_MARKER_CLASS};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Extracts records and the next-page link from listing pages.
#[derive(Debug, Clone)]
pub struct Parser {
    selectors: CatalogSelectors,
}

impl Parser {
    /// Creates a parser using the given compiled selectors.
    pub fn new(selectors: CatalogSelectors) -> Self {
        Self { selectors }
    }

    /// Parses one listing page served from `url`.
    ///
    /// Never fails: missing markup produces empty fields, and an unresolvable
    /// next link is treated as the end of the chain.
    pub fn parse_page(&self, html: &str, url: &Url) -> CatalogPage {
        let document = Html::parse_document(html);

        let books: Vec<Book> = document
            .select(&self.selectors.card)
            .enumerate()
            .map(|(idx, card)| self.parse_card(card, url, idx))
            .collect();

        let next = self.parse_next_link(&document, url);

        CatalogPage { url: url.clone(), books, next }
    }

    /// Extracts the five fields of one item card independently.
    fn parse_card(&self, card: ElementRef, base: &Url, idx: usize) -> Book {
        let title = first(card, &self.selectors.title)
            .and_then(|e| e.value().attr("title"))
            .map(|t| t.trim().to_string());

        let price = first(card, &self.selectors.price)
            .map(|e| e.text().collect::<String>().replace('Â', "").trim().to_string());

        // Own text nodes only; icons and badges nested inside are skipped
        let availability = first(card, &self.selectors.availability).map(|e| {
            e.children()
                .filter_map(|n| n.value().as_text())
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect::<String>()
        });

        let rating = first(card, &self.selectors.rating).map(|e| {
            e.value()
                .attr("class")
                .unwrap_or_default()
                .split_whitespace()
                .filter(|c| *c != RATING_MARKER_CLASS)
                .collect::<Vec<_>>()
                .join(" ")
        });

        let image_url = first(card, &self.selectors.image)
            .and_then(|e| e.value().attr("src"))
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .and_then(|src| match base.join(src) {
                Ok(resolved) => Some(resolved.to_string()),
                Err(e) => {
                    warn!("Could not resolve image URL '{}' against {}: {}", src, base, e);
                    None
                }
            });

        Book {
            title: field(title, "title", idx),
            price: field(price, "price", idx),
            availability: field(availability, "availability", idx),
            rating: field(rating, "rating", idx),
            image_url: field(image_url, "image_url", idx),
        }
    }

    /// Resolves the next-page link against the page URL, if present.
    fn parse_next_link(&self, document: &Html, base: &Url) -> Option<Url> {
        let href = document
            .select(&self.selectors.next_page)
            .next()
            .and_then(|e| e.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())?;

        match base.join(href) {
            Ok(next) => Some(next),
            Err(e) => {
                warn!("Ignoring unresolvable next link '{}' on {}: {}", href, base, e);
                None
            }
        }
    }
}

fn first<'a>(card: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    card.select(selector).next()
}

/// Unwraps an extracted value, logging the gap when markup was missing.
fn field(value: Option<String>, name: &str, idx: usize) -> String {
    value.unwrap_or_else(|| {
        debug!("Card {}: no {} found, leaving it empty", idx, name);
        String::new()
    })
}
