//! Sequential page aggregation

use crate::crawler::parser::page_has_listings;
use crate::crawler::results::PagePlan;
use crate::crawler::Fetcher;
use crate::url::page_url;

/// Collects the bodies of every page in the plan, in page order
///
/// The first page's body is reused as-is; pages `2..=total_pages` are fetched
/// one after another. A page that cannot be fetched contributes an empty body
/// instead of aborting the run.
///
/// `total_pages` comes from the server's result count, so the walk also stops
/// at the first page that was fetched but holds no listings.
///
/// # Arguments
///
/// * `fetcher` - The rate-limited fetcher
/// * `url` - The search URL the pages are derived from
/// * `plan` - The page plan from the first page
/// * `first_page` - Body of page 1
pub async fn fetch_pages(
    fetcher: &Fetcher,
    url: &str,
    plan: &PagePlan,
    first_page: String,
) -> Vec<String> {
    let mut pages = vec![first_page];

    for page in 2..=plan.total_pages {
        let body = fetcher.fetch(&page_url(url, page)).await;
        if !body.is_empty() && !page_has_listings(&body) {
            tracing::debug!("page {} has no listings, stopping ...", page);
            break;
        }
        pages.push(body);
    }

    tracing::debug!("scraped {} page(s) ...", pages.len());
    pages
}
