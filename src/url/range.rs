/// A `(min, max)` pair parsed from a `"min-max"` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    pub min: String,
    pub max: String,
}

impl Range {
    /// Returns both bounds when neither is empty
    ///
    /// Only a range with both bounds is applied to a query.
    pub fn bounds(&self) -> Option<(&str, &str)> {
        let min = self.min.trim();
        let max = self.max.trim();
        if min.is_empty() || max.is_empty() {
            None
        } else {
            Some((min, max))
        }
    }
}

/// Parses a `"min-max"` range string
///
/// The input must split on `-` into exactly two parts. Anything else is logged
/// and yields `None`, which callers treat as "no filter".
///
/// # Examples
///
/// ```
/// use tap_scraper::url::parse_range;
///
/// let range = parse_range("1990-2005").unwrap();
/// assert_eq!(range.bounds(), Some(("1990", "2005")));
///
/// assert!(parse_range("1990").is_none());
/// assert!(parse_range("1-2-3").is_none());
/// ```
pub fn parse_range(range: &str) -> Option<Range> {
    let mut parts = range.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(min), Some(max), None) => Some(Range {
            min: min.to_string(),
            max: max.to_string(),
        }),
        _ => {
            tracing::warn!("invalid range format for {}", range);
            None
        }
    }
}
