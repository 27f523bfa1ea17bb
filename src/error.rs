//! Error types shared by the crawler, the CSV sink and the summary reader.

use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause of a failed page fetch.
pub type FetchSource = Box<dyn StdError + Send + Sync>;

/// A listing page answered with a non-success HTTP status.
#[derive(Debug, Error)]
#[error("unexpected HTTP status {status}")]
pub struct UnexpectedStatus {
    pub status: u16,
}

/// Errors produced while walking the catalog or moving records to and from disk.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Transport failure or non-success status for a listing page.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchSource,
    },

    /// Output file could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Input file could not be opened or decoded.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
}

impl CrawlError {
    pub(crate) fn fetch(url: impl Into<String>, source: impl Into<FetchSource>) -> Self {
        Self::Fetch { url: url.into(), source: source.into() }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        Self::Write { path: path.into(), source: source.into() }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        Self::Read { path: path.into(), source: source.into() }
    }

    /// Returns the URL of the page that failed to load, if this is a fetch error.
    pub fn failed_url(&self) -> Option<&str> {
        match self {
            Self::Fetch { url, .. } => Some(url),
            _ => None,
        }
    }
}
