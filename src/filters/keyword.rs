//! Title search filter.

use super::Filter;
use crate::catalog::Book;

/// Keeps books whose title contains a search string (case-insensitive).
pub struct KeywordFilter {
    needle: String,
}

impl KeywordFilter {
    pub fn new(needle: impl Into<String>) -> Self {
        Self { needle: needle.into().trim().to_lowercase() }
    }
}

impl Filter for KeywordFilter {
    fn matches(&self, book: &Book) -> bool {
        book.title.to_lowercase().contains(&self.needle)
    }

    fn description(&self) -> String {
        format!("Title contains: {}", self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_book(title: &str) -> Book {
        Book { title: title.to_string(), ..Book::default() }
    }

    #[test]
    fn test_case_insensitive() {
        let filter = KeywordFilter::new("VELVET");
        assert!(filter.matches(&make_book("Tipping the Velvet")));
        assert!(!filter.matches(&make_book("Sharp Objects")));
    }

    #[test]
    fn test_needle_is_trimmed() {
        let filter = KeywordFilter::new("  attic ");
        assert!(filter.matches(&make_book("A Light in the Attic")));
        assert_eq!(filter.description(), "Title contains: attic");
    }
}
