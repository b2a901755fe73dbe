//! Configuration module for Tap-Scraper
//!
//! This module holds the typed, validated values a run is driven by. Nothing is
//! read from disk or the environment: the CLI builds these structures once and
//! they stay read-only for the rest of the run.
//!
//! # Example
//!
//! ```
//! use tap_scraper::config::{AircraftType, QueryOptions};
//!
//! let options = QueryOptions {
//!     aircraft_type: AircraftType::Jets,
//!     number: Some(2),
//!     ..QueryOptions::default()
//! };
//! assert_eq!(options.result_cap(), Some(2));
//! ```

mod types;
mod validation;

// Re-export types
pub use types::{
    AircraftType, CategoryLevel, FetcherConfig, Fractional, QueryOptions, SortKey, SortOrder,
};

// Re-export validation functions
pub use validation::{validate_fetcher_config, validate_query_options};

/// Maximum number of fetch attempts per URL
pub const TAP_MAX_RETRIES: u32 = 5;

/// Fixed delay between fetch attempts (milliseconds)
pub const TAP_RETRY_MS: u64 = 5000;

/// Default search radius, large enough to cover every listing
pub const TAP_MAX_USER_DISTANCE: u64 = 1_000_000;

/// Number of listings per result page; search URLs always request this size
pub const TAP_MAX_PAGE_SIZE: u64 = 96;

/// Search endpoint all query URLs are built from
pub const TAP_SEARCH_URL: &str = "https://www.trade-a-plane.com/search?";
