use crate::config::{TAP_MAX_RETRIES, TAP_MAX_USER_DISTANCE, TAP_RETRY_MS, TAP_SEARCH_URL};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Aircraft category searched or listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize)]
pub enum AircraftType {
    #[default]
    #[value(name = "Single Engine Piston")]
    #[serde(rename = "Single Engine Piston")]
    SingleEnginePiston,

    #[value(name = "Multi Engine Piston")]
    #[serde(rename = "Multi Engine Piston")]
    MultiEnginePiston,

    #[value(name = "Turboprop")]
    Turboprop,

    #[value(name = "Jets")]
    Jets,

    #[value(name = "Gliders | Sailplanes")]
    #[serde(rename = "Gliders | Sailplanes")]
    GlidersSailplanes,

    #[value(name = "Rotary Wing")]
    #[serde(rename = "Rotary Wing")]
    RotaryWing,

    #[value(name = "Piston Helicopters")]
    #[serde(rename = "Piston Helicopters")]
    PistonHelicopters,

    #[value(name = "Turbine Helicopters")]
    #[serde(rename = "Turbine Helicopters")]
    TurbineHelicopters,
}

impl AircraftType {
    /// Returns the category name exactly as the site spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleEnginePiston => "Single Engine Piston",
            Self::MultiEnginePiston => "Multi Engine Piston",
            Self::Turboprop => "Turboprop",
            Self::Jets => "Jets",
            Self::GlidersSailplanes => "Gliders | Sailplanes",
            Self::RotaryWing => "Rotary Wing",
            Self::PistonHelicopters => "Piston Helicopters",
            Self::TurbineHelicopters => "Turbine Helicopters",
        }
    }
}

impl fmt::Display for AircraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fractional-ownership filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize)]
pub enum Fractional {
    /// Whole aircraft only (a 1/1 share)
    #[default]
    #[value(name = "None")]
    #[serde(rename = "None")]
    Whole,

    /// No ownership filter at all
    #[value(name = "Any")]
    #[serde(rename = "Any")]
    Any,

    #[value(name = "1/2")]
    #[serde(rename = "1/2")]
    Half,

    #[value(name = "1/3")]
    #[serde(rename = "1/3")]
    Third,

    #[value(name = "1/4")]
    #[serde(rename = "1/4")]
    Quarter,

    #[value(name = "1/6")]
    #[serde(rename = "1/6")]
    Sixth,

    #[value(name = "1/7")]
    #[serde(rename = "1/7")]
    Seventh,

    #[value(name = "1/8")]
    #[serde(rename = "1/8")]
    Eighth,

    #[value(name = "1/16")]
    #[serde(rename = "1/16")]
    Sixteenth,
}

impl Fractional {
    /// Returns the ownership share as passed on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whole => "None",
            Self::Any => "Any",
            Self::Half => "1/2",
            Self::Third => "1/3",
            Self::Quarter => "1/4",
            Self::Sixth => "1/6",
            Self::Seventh => "1/7",
            Self::Eighth => "1/8",
            Self::Sixteenth => "1/16",
        }
    }
}

impl fmt::Display for Fractional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort key accepted by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[value(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    DaysSinceUpdate,
    Price,
    Make,
    Model,
    Year,
    #[value(name = "overhaul1_time")]
    #[serde(rename = "overhaul1_time")]
    Overhaul1Time,
    TotalTime,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DaysSinceUpdate => "days_since_update",
            Self::Price => "price",
            Self::Make => "make",
            Self::Model => "model",
            Self::Year => "year",
            Self::Overhaul1Time => "overhaul1_time",
            Self::TotalTime => "total_time",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Depth of the category tree to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize)]
pub enum CategoryLevel {
    #[default]
    #[value(name = "1")]
    #[serde(rename = "1")]
    One,

    #[value(name = "2")]
    #[serde(rename = "2")]
    Two,
}

impl CategoryLevel {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// Describes one user request
///
/// Built once from external input before any network activity and read-only
/// afterwards. Per-listing detail requests are derived with
/// [`QueryOptions::for_listing`] instead of mutating a shared value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryOptions {
    /// Aircraft category (`category_level1`)
    #[serde(rename = "type")]
    pub aircraft_type: AircraftType,

    /// Fractional-ownership filter
    pub fractional: Fractional,

    /// Search radius
    pub distance: u64,

    pub make: Option<String>,
    pub model: Option<String>,
    pub model_group: Option<String>,

    /// Year range as a `"min-max"` string
    pub year: Option<String>,

    /// Price range as a `"min-max"` string
    pub price: Option<String>,

    /// Total-time range as a `"min-max"` string
    pub total_time: Option<String>,

    pub sort: Option<SortKey>,
    pub sort_order: SortOrder,

    /// Maximum number of records to emit (unbounded when absent)
    pub number: Option<u64>,

    /// Fetch each listing's detail page for the extended fields
    pub deep: bool,

    /// Category tree level, only used by the category action
    pub level: CategoryLevel,

    /// Listing id, only used by the listing action
    pub listing_id: Option<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            aircraft_type: AircraftType::default(),
            fractional: Fractional::default(),
            distance: TAP_MAX_USER_DISTANCE,
            make: None,
            model: None,
            model_group: None,
            year: None,
            price: None,
            total_time: None,
            sort: None,
            sort_order: SortOrder::default(),
            number: None,
            deep: false,
            level: CategoryLevel::default(),
            listing_id: None,
        }
    }
}

impl QueryOptions {
    /// Returns the user-requested result cap, if any
    pub fn result_cap(&self) -> Option<u64> {
        self.number
    }

    /// Derives the request used to fetch one listing's detail page
    ///
    /// The receiver is left untouched; the returned value carries only what the
    /// listing action reads.
    pub fn for_listing(&self, id: &str) -> QueryOptions {
        QueryOptions {
            listing_id: Some(id.to_string()),
            ..QueryOptions::default()
        }
    }
}

/// Settings for the rate-limited fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Search endpoint, including the trailing `?`
    pub search_url: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Maximum attempts per URL
    pub max_retries: u32,

    /// Fixed delay between attempts
    pub retry_delay: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            search_url: TAP_SEARCH_URL.to_string(),
            user_agent: format!("tap/{}", env!("CARGO_PKG_VERSION")),
            max_retries: TAP_MAX_RETRIES,
            retry_delay: Duration::from_millis(TAP_RETRY_MS),
        }
    }
}
