//! Catalog collection: driving the fetcher and extractor across pages.
//!
//! The collector owns the run: it stamps one shared timestamp before any
//! fetching starts, walks pages in order through the one shared
//! [`PageFetcher`], and tolerates per-page failures. A bad page degrades
//! completeness, never the run.

use std::thread;
use std::time::Duration;

use chrono::Utc;

use crate::extract::extract_cards;
use crate::fetch::PageFetcher;
use crate::parse::Document;
use crate::record::RawRecord;
use crate::VestioError;

/// Parameters for one collection run.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Number of listing pages to walk, starting at page 1.
    pub pages: u32,
    /// Throttle delay between consecutive page requests.
    pub delay: Duration,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self { pages: 50, delay: Duration::from_millis(500) }
    }
}

/// A page that could not be fetched within the retry budget.
#[derive(Debug)]
pub struct PageFailure {
    pub page: u32,
    pub error: VestioError,
}

/// The outcome of one collection run.
///
/// `records` may be shorter than `pages * cards_per_page`, or empty, when
/// pages fail or carry no cards. Failed pages are listed in `failures`
/// for the caller to report.
#[derive(Debug, Default)]
pub struct Harvest {
    pub records: Vec<RawRecord>,
    pub failures: Vec<PageFailure>,
}

impl Harvest {
    /// Number of pages that failed outright.
    pub fn failed_pages(&self) -> usize {
        self.failures.len()
    }
}

/// Collects raw records from pages `1..=config.pages`.
///
/// One run timestamp is generated up front and stamped onto every record.
/// Pages are fetched strictly in order with `config.delay` between them;
/// a fetch failure is recorded and the walk continues with the next page.
pub fn collect_catalog(fetcher: &PageFetcher, config: &CollectConfig) -> Harvest {
    let timestamp = run_timestamp();
    let mut harvest = Harvest::default();

    for page in 1..=config.pages {
        match fetcher.fetch_page(page) {
            Ok(body) => {
                let doc = Document::parse(&body);
                let cards = extract_cards(&doc);
                harvest
                    .records
                    .extend(cards.into_iter().map(|fields| RawRecord::stamped(fields, &timestamp)));
            }
            Err(error) => harvest.failures.push(PageFailure { page, error }),
        }

        if page < config.pages && !config.delay.is_zero() {
            thread::sleep(config.delay);
        }
    }

    harvest
}

/// ISO-8601 UTC stamp shared by every record of one run.
fn run_timestamp() -> String {
    Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
