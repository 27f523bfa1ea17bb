//! Star rating filter.

use super::Filter;
use crate::catalog::Book;

/// Keeps books whose star count is in an allowed set.
pub struct RatingFilter {
    allowed: Vec<u8>,
}

impl RatingFilter {
    /// Creates a rating filter; values outside 1-5 are dropped.
    pub fn new(allowed: Vec<u8>) -> Self {
        let mut allowed: Vec<u8> = allowed.into_iter().filter(|s| (1..=5).contains(s)).collect();
        allowed.sort_unstable();
        allowed.dedup();
        Self { allowed }
    }
}

impl Filter for RatingFilter {
    fn matches(&self, book: &Book) -> bool {
        book.stars().is_some_and(|stars| self.allowed.contains(&stars))
    }

    fn description(&self) -> String {
        let stars: Vec<String> = self.allowed.iter().map(u8::to_string).collect();
        format!("Rating: {} stars", stars.join("/"))
    }
}
