//! HTML parser for search results, detail pages and category trees
//!
//! This module handles parsing page bodies to extract:
//! - Listing records from a search-results page
//! - Extended free-text sections from a listing's detail page
//! - Level names from a category page
//!
//! Missing markup never fails a parse: absent fields become empty strings and
//! an unparseable page yields no listings.

use crate::crawler::record::{DetailSections, ListingRecord, YEAR_NOT_LISTED};
use scraper::{ElementRef, Html, Selector};

/// Selectors applied to every listing block
struct ListingSelectors {
    title_link: Selector,
    price: Selector,
    registration: Selector,
    total_time: Selector,
    address: Selector,
    last_update: Selector,
}

impl ListingSelectors {
    fn new() -> Option<Self> {
        Some(Self {
            title_link: Selector::parse(".lst-title > h3 > a").ok()?,
            price: Selector::parse(".txt-price").ok()?,
            registration: Selector::parse(".txt-reg-num").ok()?,
            total_time: Selector::parse(".txt-total-time").ok()?,
            address: Selector::parse(".address").ok()?,
            last_update: Selector::parse(".last-update").ok()?,
        })
    }
}

/// Parses one search-results page into listing records, in document order
///
/// # Arguments
///
/// * `html` - The page body
/// * `fetch_date` - Timestamp stamped on every record of the run
///
/// # Example
///
/// ```
/// use tap_scraper::crawler::parse_listings;
///
/// let html = r#"<div class="result_listing" data-listing_id="7" data-model_group="PA-28"
///     data-seller_id="3"><div class="lst-title"><h3>
///     <a href="/search?make=PIPER&model=PA-28-181">1999 Piper Archer</a></h3></div></div>"#;
/// let records = parse_listings(html, 0);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].year, "1999");
/// assert_eq!(records[0].make, "PIPER");
/// ```
pub fn parse_listings(html: &str, fetch_date: i64) -> Vec<ListingRecord> {
    let document = Html::parse_document(html);

    let (Ok(listing_selector), Some(selectors)) =
        (Selector::parse(".result_listing"), ListingSelectors::new())
    else {
        return Vec::new();
    };

    document
        .select(&listing_selector)
        .map(|element| parse_listing(element, &selectors, fetch_date))
        .collect()
}

/// Returns true if the page holds at least one listing block
pub fn page_has_listings(html: &str) -> bool {
    let document = Html::parse_document(html);
    Selector::parse(".result_listing")
        .map(|selector| document.select(&selector).next().is_some())
        .unwrap_or(false)
}

/// Extracts one record from a listing block
fn parse_listing(element: ElementRef, selectors: &ListingSelectors, fetch_date: i64) -> ListingRecord {
    let attr = |name: &str| element.value().attr(name).unwrap_or("").trim().to_string();

    let title_link = element.select(&selectors.title_link).next();
    let title = title_link
        .map(|link| link.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    let href = title_link
        .and_then(|link| link.value().attr("href"))
        .unwrap_or("");

    let mut record = ListingRecord {
        id: attr("data-listing_id"),
        model_group: attr("data-model_group"),
        seller_id: attr("data-seller_id"),
        year: year_from_title(&title),
        title,
        make: String::new(),
        model: String::new(),
        aircraft_type: String::new(),
        category: String::new(),
        price: text_of(element, &selectors.price),
        registration: strip_label(&text_of(element, &selectors.registration), "Reg#"),
        total_time: strip_label(&text_of(element, &selectors.total_time), "TT:"),
        address: text_of(element, &selectors.address),
        last_updated: strip_label(&text_of(element, &selectors.last_update), "Last Update:"),
        fetch_date,
        details: None,
    };

    for (key, value) in query_pairs(href) {
        let value = value.replace('+', " ");
        match key {
            "make" => record.make = value,
            "model" => record.model = value,
            "s-type" => record.aircraft_type = value,
            "category_level1" => record.category = value,
            _ => {}
        }
    }

    record
}

/// Splits a link's query string into `name=value` pairs
///
/// Segments that are not exactly one `name=value` pair are skipped. Values are
/// returned as they appear in the link.
fn query_pairs(href: &str) -> impl Iterator<Item = (&str, &str)> {
    let query = href.split_once('?').map_or(href, |(_, query)| query);

    query.split('&').filter_map(|pair| {
        let mut parts = pair.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => Some((key, value)),
            _ => None,
        }
    })
}

/// Returns the leading token of a title when it is all digits
fn year_from_title(title: &str) -> String {
    match title.split_whitespace().next() {
        Some(token) if token.bytes().all(|b| b.is_ascii_digit()) => token.to_string(),
        _ => YEAR_NOT_LISTED.to_string(),
    }
}

/// Collects the trimmed text of every match of `selector` under `element`
fn text_of(element: ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|matched| matched.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Removes every occurrence of `label` together with the whitespace after it
fn strip_label(text: &str, label: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(label) {
        stripped.push_str(&rest[..pos]);
        rest = rest[pos + label.len()..].trim_start();
    }
    stripped.push_str(rest);

    stripped.trim().to_string()
}

/// Parses the extended sections of a listing's detail page
pub fn parse_detail(html: &str) -> DetailSections {
    let document = Html::parse_document(html);

    let section = |css: &str| -> String {
        let Ok(selector) = Selector::parse(css) else {
            return String::new();
        };
        document
            .select(&selector)
            .flat_map(|element| element.text())
            .collect::<String>()
            .trim()
            .to_string()
    };

    DetailSections {
        specs: section("#bottom_section > #general_specs > p"),
        description: section("#detailed_desc > pre"),
        avionics: section("#avionics_equipment > pre"),
        airframe: section("#airframe > pre"),
        engine: section("#engines_mods > pre"),
        int_ext: section("#interior_exterior > pre"),
        remarks: section("#remarks > pre"),
    }
}

/// Parses the level names of a category page
///
/// Each entry's `title` attribute is one level; the `Show All Makes` link is
/// not a level and is skipped.
pub fn parse_category_levels(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse(".column > ul > li > a") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("title"))
        .map(|title| title.trim().to_string())
        .filter(|level| level != "Show All Makes")
        .collect()
}

/// Lazy, finite sequence of listing records across result pages
///
/// Pages are parsed one at a time as records are pulled, so a caller that
/// stops early never parses the remaining pages. The stream is consumed by
/// iteration and cannot be restarted.
pub struct ListingStream {
    pages: std::vec::IntoIter<String>,
    current: std::vec::IntoIter<ListingRecord>,
    fetch_date: i64,
}

impl ListingStream {
    pub fn new(pages: Vec<String>, fetch_date: i64) -> Self {
        Self {
            pages: pages.into_iter(),
            current: Vec::new().into_iter(),
            fetch_date,
        }
    }
}

impl Iterator for ListingStream {
    type Item = ListingRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.current.next() {
                return Some(record);
            }

            let body = self.pages.next()?;
            self.current = parse_listings(&body, self.fetch_date).into_iter();
        }
    }
}
