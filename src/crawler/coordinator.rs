//! Run coordinator - full search and category runs
//!
//! A search run walks `Start → FetchFirstPage → ParseCount →
//! [FetchRemainingPages] → ExtractAll → [DetailFetch] → Emit → … → Done`.
//! Nothing in it raises on bad data: a failed fetch or missing markup only
//! means fewer records.

use crate::config::{QueryOptions, TAP_MAX_PAGE_SIZE};
use crate::crawler::pages::fetch_pages;
use crate::crawler::parser::{parse_category_levels, parse_detail, ListingStream};
use crate::crawler::record::DetailSections;
use crate::crawler::results::{parse_result_count, PagePlan};
use crate::crawler::Fetcher;
use crate::output::OutputHandler;
use crate::state::{RunState, RunTracker};
use crate::url::{build_url, Action};
use crate::TapError;

/// Runs a complete search and writes every record to `output`
///
/// Records are emitted in discovery order as they are produced. The stream
/// stops once the plan's effective cap is reached, even mid-page.
///
/// # Arguments
///
/// * `fetcher` - The rate-limited fetcher
/// * `options` - The query options
/// * `output` - Where records are written
///
/// # Returns
///
/// * `Ok(usize)` - Number of records emitted
/// * `Err(TapError)` - The output could not be written
pub async fn run_search<O>(
    fetcher: &Fetcher,
    options: &QueryOptions,
    output: &mut O,
) -> Result<usize, TapError>
where
    O: OutputHandler + ?Sized,
{
    let mut tracker = RunTracker::new();
    let fetch_date = chrono::Utc::now().timestamp_millis();
    let url = build_url(&fetcher.config().search_url, options, Action::Search);

    tracker.advance(RunState::FetchFirstPage)?;
    let first_page = fetcher.fetch(&url).await;

    tracker.advance(RunState::ParseCount)?;
    let Some(results_found) = parse_result_count(&first_page) else {
        tracing::warn!("no result count found on first page, nothing to emit");
        tracker.advance(RunState::Done)?;
        output.finish()?;
        return Ok(0);
    };

    let plan = PagePlan::new(results_found, options.result_cap(), TAP_MAX_PAGE_SIZE);
    tracing::debug!(
        "fetching {} of {} results over {} page(s) ...",
        plan.effective_cap,
        plan.results_found,
        plan.total_pages
    );

    let pages = if plan.total_pages > 1 {
        tracker.advance(RunState::FetchRemainingPages)?;
        fetch_pages(fetcher, &url, &plan, first_page).await
    } else {
        vec![first_page]
    };

    tracker.advance(RunState::ExtractAll)?;
    let mut emitted = 0;

    for record in ListingStream::new(pages, fetch_date).take(plan.record_cap()) {
        let record = if options.deep {
            tracker.advance(RunState::DetailFetch)?;
            let details = fetch_details(fetcher, options, &record.id).await;
            record.with_details(details)
        } else {
            record
        };

        tracker.advance(RunState::Emit)?;
        output.emit(&record)?;
        emitted += 1;
        tracker.advance(RunState::ExtractAll)?;
    }

    tracker.advance(RunState::Done)?;
    output.finish()?;

    tracing::info!("emitted {} of {} results", emitted, plan.results_found);
    Ok(emitted)
}

/// Fetches and parses one listing's detail page
///
/// The listing request is derived from `options`; `options` itself is never
/// modified.
pub async fn fetch_details(fetcher: &Fetcher, options: &QueryOptions, id: &str) -> DetailSections {
    let request = options.for_listing(id);
    let url = build_url(&fetcher.config().search_url, &request, Action::Listing);
    parse_detail(&fetcher.fetch(&url).await)
}

/// Fetches a category page and returns its level names
pub async fn list_categories(fetcher: &Fetcher, options: &QueryOptions) -> Vec<String> {
    let url = build_url(&fetcher.config().search_url, options, Action::Category);
    let levels = parse_category_levels(&fetcher.fetch(&url).await);
    tracing::debug!("found {} {} level(s)", levels.len(), options.aircraft_type);
    levels
}
