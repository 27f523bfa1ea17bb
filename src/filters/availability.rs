//! Stock availability filter.

use super::Filter;
use crate::catalog::Book;

/// Which stock state to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "all" => Ok(Availability::All),
            "in-stock" | "in" => Ok(Availability::InStock),
            "out-of-stock" | "out" => Ok(Availability::OutOfStock),
            _ => Err(format!("Unknown availability: {}. Use: all, in-stock, out-of-stock", s)),
        }
    }
}

/// Filters books by whether their availability text reports stock.
pub struct AvailabilityFilter {
    wanted: Availability,
}

impl AvailabilityFilter {
    pub fn new(wanted: Availability) -> Self {
        Self { wanted }
    }
}

impl Filter for AvailabilityFilter {
    fn matches(&self, book: &Book) -> bool {
        match self.wanted {
            Availability::All => true,
            Availability::InStock => book.in_stock(),
            Availability::OutOfStock => !book.in_stock(),
        }
    }

    fn description(&self) -> String {
        match self.wanted {
            Availability::All => "Availability: any".to_string(),
            Availability::InStock => "In stock only".to_string(),
            Availability::OutOfStock => "Out of stock only".to_string(),
        }
    }
}
