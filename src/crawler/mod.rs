//! Crawler module for listing retrieval
//!
//! This module contains the core scraping logic, including:
//! - Rate-limited HTTP fetching with fixed-delay retry
//! - Result-count parsing and page planning
//! - Sequential page aggregation
//! - Listing, detail and category extraction
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod pages;
mod parser;
mod record;
mod results;

pub use coordinator::{fetch_details, list_categories, run_search};
pub use fetcher::{build_http_client, Fetcher};
pub use pages::fetch_pages;
pub use parser::{parse_category_levels, parse_detail, parse_listings, ListingStream};
pub use record::{DetailSections, ListingRecord, YEAR_NOT_LISTED};
pub use results::{parse_result_count, PagePlan};
