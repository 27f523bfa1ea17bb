//! Pagination-driven traversal of a catalog.
//!
//! The walker holds the current page URL as its only state. Each call to
//! [`CatalogWalker::next_page`] fetches and parses exactly one listing page
//! and moves the cursor to the page's next link. The walk ends when a page
//! has no next link.
//!
//! Visited pages are not tracked: a next link that points back to an earlier
//! page makes the walk infinite unless a page cap is set.

use crate::catalog::client::PageSource;
use crate::catalog::models::{Book, CatalogPage};
use crate::catalog::parser::Parser;
use crate::error::CrawlError;
use tracing::{debug, info};
use url::Url;

/// Sequential walker over a linked chain of listing pages.
pub struct CatalogWalker<'a, S: PageSource + ?Sized> {
    source: &'a S,
    parser: Parser,
    cursor: Option<Url>,
    pages_visited: usize,
    max_pages: Option<usize>,
}

impl<'a, S: PageSource + ?Sized> CatalogWalker<'a, S> {
    /// Creates a walker positioned at `start_url`.
    pub fn new(source: &'a S, parser: Parser, start_url: &str) -> Result<Self, CrawlError> {
        let start = Url::parse(start_url).map_err(|source| CrawlError::InvalidUrl {
            url: start_url.to_string(),
            source,
        })?;

        Ok(Self { source, parser, cursor: Some(start), pages_visited: 0, max_pages: None })
    }

    /// Stops the walk after `max_pages` pages. `None` walks the whole chain.
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Number of pages fetched so far.
    pub fn pages_visited(&self) -> usize {
        self.pages_visited
    }

    /// URL that the next call will fetch, if the walk has not ended.
    pub fn current_url(&self) -> Option<&Url> {
        self.cursor.as_ref()
    }

    /// Fetches and parses the next page of the chain.
    ///
    /// Returns `Ok(None)` once the chain has ended. A fetch failure ends the
    /// walk as well; later calls return `Ok(None)`.
    pub async fn next_page(&mut self) -> Result<Option<CatalogPage>, CrawlError> {
        if let Some(max) = self.max_pages {
            if self.pages_visited >= max {
                if self.cursor.take().is_some() {
                    info!("Reached page limit ({}), stopping", max);
                }
                return Ok(None);
            }
        }

        let Some(url) = self.cursor.take() else {
            return Ok(None);
        };

        let fetched = self.source.fetch(&url).await?;
        self.pages_visited += 1;

        let page = self.parser.parse_page(&fetched.html, &fetched.url);
        info!("Found {} books on {}", page.count(), page.url);

        match &page.next {
            Some(next) => debug!("Next page: {}", next),
            None => debug!("No next link on {}, end of catalog", page.url),
        }
        self.cursor = page.next.clone();

        Ok(Some(page))
    }

    /// Walks the whole chain and returns every record in visitation order.
    pub async fn traverse(&mut self) -> Result<Vec<Book>, CrawlError> {
        let mut books = Vec::new();

        while let Some(page) = self.next_page().await? {
            books.extend(page.books);
        }

        info!("Traversal finished: {} books from {} pages", books.len(), self.pages_visited);
        Ok(books)
    }
}
