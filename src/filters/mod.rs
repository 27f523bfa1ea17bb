//! Book filtering system with composable filters.

pub mod availability;
pub mod keyword;
pub mod price;
pub mod rating;

use crate::catalog::Book;

pub use availability::{Availability, AvailabilityFilter};
pub use keyword::KeywordFilter;
pub use price::PriceFilter;
pub use rating::RatingFilter;

/// Trait for filtering books.
pub trait Filter: Send + Sync {
    /// Returns true if the book passes the filter.
    fn matches(&self, book: &Book) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a book passes all filters.
    pub fn matches(&self, book: &Book) -> bool {
        self.filters.iter().all(|f| f.matches(book))
    }

    /// Filters a collection of books.
    pub fn apply(&self, books: Vec<Book>) -> Vec<Book> {
        books.into_iter().filter(|b| self.matches(b)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from command-line options.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds a price range filter.
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.chain.add(PriceFilter::new(min, max));
        }
        self
    }

    /// Adds a rating filter for the given star counts.
    pub fn ratings(mut self, allowed: Option<Vec<u8>>) -> Self {
        if let Some(allowed) = allowed {
            self.chain.add(RatingFilter::new(allowed));
        }
        self
    }

    /// Adds a stock filter unless `Availability::All` is requested.
    pub fn availability(mut self, availability: Availability) -> Self {
        if availability != Availability::All {
            self.chain.add(AvailabilityFilter::new(availability));
        }
        self
    }

    /// Adds a title search filter.
    pub fn title_search(mut self, needle: Option<String>) -> Self {
        if let Some(needle) = needle.filter(|n| !n.trim().is_empty()) {
            self.chain.add(KeywordFilter::new(needle));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
