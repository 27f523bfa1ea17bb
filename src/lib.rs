//! books-crawler - paginating catalog crawler with CSV export
//!
//! Walks a chain of listing pages from a start URL, extracts one record per
//! item card, and writes the records to a UTF-8 CSV with byte-order mark.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod format;
pub mod output;
pub mod summary;

pub use catalog::{Book, CatalogPage, CatalogWalker, PageSource};
pub use config::Config;
pub use error::CrawlError;
pub use summary::Summary;
