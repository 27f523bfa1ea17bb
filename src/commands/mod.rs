//! CLI command implementations.

pub mod crawl;
pub mod summary;

pub use crawl::{CrawlCommand, CrawlReport};
pub use summary::{SummaryCommand, SummaryOptions};
