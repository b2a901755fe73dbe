//! Result-count parsing and page planning

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

fn heading_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| match Regex::new(r"^Showing.*of(.*)results*") {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::error!("invalid result heading pattern: {}", e);
                None
            }
        })
        .as_ref()
}

/// Page plan computed from the first result page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    /// Total matches reported by the server
    pub results_found: u64,

    /// Smaller of `results_found` and the user's cap
    pub effective_cap: u64,

    /// Listings per page
    pub page_size: u64,

    /// Pages needed to cover `effective_cap`
    pub total_pages: u64,
}

impl PagePlan {
    /// Computes a page plan
    ///
    /// A cap that fits in one page always yields exactly one page; otherwise the
    /// page count is `ceil(effective_cap / page_size)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tap_scraper::PagePlan;
    ///
    /// let plan = PagePlan::new(150, None, 96);
    /// assert_eq!(plan.total_pages, 2);
    ///
    /// let plan = PagePlan::new(150, Some(10), 96);
    /// assert_eq!(plan.effective_cap, 10);
    /// assert_eq!(plan.total_pages, 1);
    /// ```
    pub fn new(results_found: u64, cap: Option<u64>, page_size: u64) -> Self {
        let page_size = page_size.max(1);
        let effective_cap = cap.map_or(results_found, |cap| cap.min(results_found));

        let total_pages = if effective_cap <= page_size {
            1
        } else {
            effective_cap.div_ceil(page_size)
        };

        Self {
            results_found,
            effective_cap,
            page_size,
            total_pages,
        }
    }

    /// Returns the effective cap as a record count
    pub fn record_cap(&self) -> usize {
        usize::try_from(self.effective_cap).unwrap_or(usize::MAX)
    }
}

/// Extracts the total result count from a search page
///
/// The summary heading reads like `Showing 1 - 96 of 1,234 results`. All
/// whitespace is removed before matching and thousands separators are dropped
/// from the number.
///
/// # Returns
///
/// * `Some(u64)` - The server-reported total
/// * `None` - The heading is missing or has an unexpected shape
pub fn parse_result_count(body: &str) -> Option<u64> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("#search_results_area > .search_options > h2").ok()?;

    let heading: String = document
        .select(&selector)
        .flat_map(|element| element.text())
        .flat_map(|text| text.chars())
        .filter(|c| !c.is_whitespace())
        .collect();

    if heading.is_empty() {
        return None;
    }

    let captured = heading_pattern()?.captures(&heading)?.get(1)?.as_str();

    let digits: String = captured
        .chars()
        .filter(|c| *c != ',')
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}
