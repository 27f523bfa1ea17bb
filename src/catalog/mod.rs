//! Catalog modules: page fetching, selectors, parsing, data models and traversal.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;
pub mod walker;

pub use client::{CatalogClient, FetchedPage, PageSource};
pub use models::{Book, CatalogPage};
pub use parser::Parser;
pub use selectors::{CatalogSelectors, SelectorConfig};
pub use walker::CatalogWalker;
