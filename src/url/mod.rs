//! URL handling module for Tap-Scraper
//!
//! This module provides query-URL construction for the three actions the
//! search endpoint understands, and parsing of `"min-max"` range filters.

mod builder;
mod range;

use crate::TapError;
use std::fmt;
use std::str::FromStr;

// Re-export main functions
pub use builder::{build_url, page_url};
pub use range::{parse_range, Range};

/// Query mode of a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Category tree listing
    Category,
    /// Advanced search over listings
    Search,
    /// Single-listing detail page
    Listing,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Search => "search",
            Self::Listing => "listing",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = TapError;

    /// Parses an action tag
    ///
    /// An unknown tag is a caller bug, reported as [`TapError::InvalidAction`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(Self::Category),
            "search" => Ok(Self::Search),
            "listing" => Ok(Self::Listing),
            other => Err(TapError::InvalidAction(other.to_string())),
        }
    }
}
