//! Aggregate metrics over a set of books.

use crate::catalog::Book;
use serde::Serialize;

/// Headline numbers for a (possibly filtered) book list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub average_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub average_rating: Option<f64>,
    pub in_stock: usize,
    /// Books per star count; index 0 holds one-star books
    pub rating_breakdown: [usize; 5],
}

impl Summary {
    /// Computes metrics over `books`. Unparseable prices and ratings are skipped.
    pub fn from_books(books: &[Book]) -> Self {
        let prices: Vec<f64> = books.iter().filter_map(Book::price_value).collect();
        let stars: Vec<u8> = books.iter().filter_map(Book::stars).collect();

        let mut rating_breakdown = [0usize; 5];
        for s in &stars {
            rating_breakdown[usize::from(*s - 1)] += 1;
        }

        Self {
            count: books.len(),
            average_price: mean(prices.iter().copied()),
            min_price: prices.iter().copied().reduce(f64::min),
            max_price: prices.iter().copied().reduce(f64::max),
            average_rating: mean(stars.iter().map(|s| f64::from(*s))),
            in_stock: books.iter().filter(|b| b.says_in_stock()).count(),
            rating_breakdown,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
