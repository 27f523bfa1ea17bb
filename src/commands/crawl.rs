//! Crawl command implementation.

use crate::catalog::{CatalogClient, CatalogSelectors, CatalogWalker, PageSource, Parser};
use crate::config::Config;
use crate::output;
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::info;

/// Walks the catalog and writes every record to the configured CSV.
pub struct CrawlCommand {
    config: Config,
}

/// Outcome of a successful crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    pub books: usize,
    pub pages: usize,
}

impl CrawlCommand {
    /// Creates a new crawl command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the crawl over HTTP.
    pub async fn execute(&self) -> Result<CrawlReport> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_source(&client).await
    }

    /// Executes the crawl with a provided page source (for testing).
    ///
    /// The output file is only touched once the whole chain has been walked,
    /// so a failed fetch leaves any previous output in place.
    pub async fn execute_with_source(&self, source: &impl PageSource) -> Result<CrawlReport> {
        let started = Instant::now();
        info!("Crawling catalog from {}", self.config.start_url);

        let selectors = CatalogSelectors::compile(&self.config.selectors)
            .context("Invalid selector configuration")?;

        let mut walker = CatalogWalker::new(source, Parser::new(selectors), &self.config.start_url)?
            .with_max_pages(self.config.max_pages);

        let books = walker.traverse().await.context("Crawl aborted")?;

        let written = output::write_books(&books, &self.config.output)
            .context("Failed to write output")?;

        let report = CrawlReport { books: written, pages: walker.pages_visited() };
        info!(
            "Scraped {} books from {} pages into {} in {:.1?}",
            report.books,
            report.pages,
            self.config.output.display(),
            started.elapsed()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FetchedPage;
    use crate::error::{CrawlError, UnexpectedStatus};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tempfile::TempDir;
    use url::Url;

    /// Mock page source serving fixed HTML per URL.
    struct MockSource {
        pages: HashMap<String, String>,
        call_count: AtomicU32,
    }

    impl MockSource {
        fn new(pages: Vec<(&str, String)>) -> Self {
            Self {
                pages: pages.into_iter().map(|(u, h)| (u.to_string(), h)).collect(),
                call_count: AtomicU32::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageSource for MockSource {
        async fn fetch(&self, url: &Url) -> Result<FetchedPage, CrawlError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(url.as_str())
                .map(|html| FetchedPage { url: url.clone(), html: html.clone() })
                .ok_or_else(|| CrawlError::fetch(url.as_str(), UnexpectedStatus { status: 503 }))
        }
    }

    const START: &str = "https://books.example.com/catalogue/page-1.html";
    const SECOND: &str = "https://books.example.com/catalogue/page-2.html";

    fn make_listing_html(books: &[(&str, &str)], next: Option<&str>) -> String {
        let mut html = String::from("<html><body><ol class=\"row\">");
        for (title, price) in books {
            html.push_str(&format!(
                r#"<li><article class="product_pod">
                    <div class="image_container"><a href="x"><img src="../media/{0}.jpg"></a></div>
                    <p class="star-rating Five"></p>
                    <h3><a href="x" title="{0}">{0}</a></h3>
                    <p class="price_color">{1}</p>
                    <p class="instock availability">In stock</p>
                </article></li>"#,
                title, price
            ));
        }
        html.push_str("</ol>");
        if let Some(next) = next {
            html.push_str(&format!(r#"<ul class="pager"><li class="next"><a href="{}">next</a></li></ul>"#, next));
        }
        html.push_str("</body></html>");
        html
    }

    fn make_test_config(dir: &TempDir) -> Config {
        Config {
            start_url: START.to_string(),
            output: dir.path().join("books_info.csv"),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_crawl_writes_all_pages() {
        let dir = TempDir::new().unwrap();
        let source = MockSource::new(vec![
            (START, make_listing_html(&[("Alpha", "£1.00"), ("Beta", "£2.00")], Some("page-2.html"))),
            (SECOND, make_listing_html(&[("Gamma", "£3.00")], None)),
        ]);

        let config = make_test_config(&dir);
        let cmd = CrawlCommand::new(config.clone());
        let report = cmd.execute_with_source(&source).await.unwrap();

        assert_eq!(report, CrawlReport { books: 3, pages: 2 });
        assert_eq!(source.call_count(), 2);

        let books = output::read_books(&config.output).unwrap();
        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(books[2].image_url, "https://books.example.com/media/Gamma.jpg");
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let source = MockSource::new(vec![(
            START,
            make_listing_html(&[("Alpha", "£1.00")], Some("page-2.html")),
        )]);

        let config = make_test_config(&dir);
        let cmd = CrawlCommand::new(config.clone());
        let err = cmd.execute_with_source(&source).await.unwrap_err();

        assert!(format!("{:#}", err).contains(SECOND));
        assert!(!config.output.exists());
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_output() {
        let dir = TempDir::new().unwrap();
        let config = make_test_config(&dir);
        std::fs::write(&config.output, "previous run").unwrap();

        let source = MockSource::new(vec![]);
        let cmd = CrawlCommand::new(config.clone());
        assert!(cmd.execute_with_source(&source).await.is_err());

        assert_eq!(std::fs::read_to_string(&config.output).unwrap(), "previous run");
    }

    #[tokio::test]
    async fn test_max_pages_limits_crawl() {
        let dir = TempDir::new().unwrap();
        let source = MockSource::new(vec![
            (START, make_listing_html(&[("Alpha", "£1.00")], Some("page-2.html"))),
            (SECOND, make_listing_html(&[("Beta", "£2.00")], None)),
        ]);

        let mut config = make_test_config(&dir);
        config.max_pages = Some(1);

        let report = CrawlCommand::new(config).execute_with_source(&source).await.unwrap();
        assert_eq!(report, CrawlReport { books: 1, pages: 1 });
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_selector_config() {
        let dir = TempDir::new().unwrap();
        let mut config = make_test_config(&dir);
        config.selectors.card = "article[".to_string();

        let source = MockSource::new(vec![]);
        let err = CrawlCommand::new(config).execute_with_source(&source).await.unwrap_err();

        assert!(err.to_string().contains("Invalid selector configuration"));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unwritable_output() {
        let dir = TempDir::new().unwrap();
        let source = MockSource::new(vec![(START, make_listing_html(&[("Alpha", "£1.00")], None))]);

        let mut config = make_test_config(&dir);
        config.output = dir.path().join("no-such-dir").join("books.csv");

        let err = CrawlCommand::new(config).execute_with_source(&source).await.unwrap_err();
        assert!(err.to_string().contains("Failed to write output"));
    }
}
