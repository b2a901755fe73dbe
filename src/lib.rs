//! Tap-Scraper: a rate-limit-aware Trade-a-Plane listing scraper
//!
//! This crate pulls aircraft-for-sale listings from the Trade-a-Plane search
//! site and emits one JSON object per listing. Every network call is strictly
//! sequential because the site throttles aggressively on concurrent requests.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Tap-Scraper operations
#[derive(Debug, Error)]
pub enum TapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("can not build URL, invalid action {0}")]
    InvalidAction(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::RunState,
        to: state::RunState,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Tap-Scraper operations
pub type Result<T> = std::result::Result<T, TapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::{FetcherConfig, QueryOptions};
pub use crate::crawler::{list_categories, run_search, Fetcher, ListingRecord, PagePlan};
pub use crate::output::{JsonLinesOutput, OutputHandler};
pub use crate::state::RunState;
pub use crate::url::{build_url, parse_range, Action, Range};
