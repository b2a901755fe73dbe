use serde::Serialize;

/// Year value used when a title does not start with a number
pub const YEAR_NOT_LISTED: &str = "Not Listed";

/// One aircraft-for-sale listing, the unit of output
///
/// Serialized field order is the order of emission in the JSON line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    pub id: String,
    pub model_group: String,
    pub seller_id: String,
    pub title: String,
    pub make: String,
    pub model: String,
    #[serde(rename = "type")]
    pub aircraft_type: String,
    pub category: String,
    pub year: String,
    pub price: String,
    pub registration: String,
    pub total_time: String,
    pub address: String,
    pub last_updated: String,

    /// Milliseconds since the Unix epoch, shared by every record of a run
    pub fetch_date: i64,

    /// Extended fields, present only in deep mode
    #[serde(flatten)]
    pub details: Option<DetailSections>,
}

impl ListingRecord {
    /// Attaches the extended fields from a detail page
    pub fn with_details(self, details: DetailSections) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }
}

/// Free-text sections of a listing's detail page
///
/// A section missing from the page is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailSections {
    pub specs: String,
    pub description: String,
    pub avionics: String,
    pub airframe: String,
    pub engine: String,
    pub int_ext: String,
    pub remarks: String,
}
