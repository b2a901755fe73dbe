use crate::config::{Fractional, QueryOptions, TAP_MAX_PAGE_SIZE};
use crate::url::{parse_range, Action};
use url::form_urlencoded::byte_serialize;

/// Builds a fully encoded query URL for the given action
///
/// Parameters are appended to `search_url` as `&name=value` pairs in a fixed
/// order, so identical inputs always produce byte-identical URLs.
///
/// # Search Parameters
///
/// | Option | Encoding |
/// |--------|----------|
/// | page size | always `TAP_MAX_PAGE_SIZE` |
/// | fractional | `Any` omitted, `None` → `1%2F1`, otherwise percent-encoded |
/// | type | spaces → `+` |
/// | make / model / model group | uppercased, whitespace runs → `+`, percent-encoded |
/// | year / price / total time | emitted only when both bounds parse, percent-encoded |
/// | sort | emitted only when a sort key is set |
///
/// # Arguments
///
/// * `search_url` - The search endpoint, ending in `?`
/// * `options` - The query options
/// * `action` - Which URL to build
///
/// # Example
///
/// ```
/// use tap_scraper::config::QueryOptions;
/// use tap_scraper::url::{build_url, Action};
///
/// let options = QueryOptions::default().for_listing("2409871");
/// let url = build_url("https://www.trade-a-plane.com/search?", &options, Action::Listing);
/// assert_eq!(url, "https://www.trade-a-plane.com/search?&listing_id=2409871");
/// ```
pub fn build_url(search_url: &str, options: &QueryOptions, action: Action) -> String {
    let mut url = search_url.to_string();

    match action {
        Action::Search => {
            url.push_str("&s-advanced=yes");
            url.push_str("&s-type=aircraft");
            url.push_str("&sale_status=For+Sale");
            url.push_str(&format!("&s-page_size={}", TAP_MAX_PAGE_SIZE));

            match options.fractional {
                Fractional::Any => {}
                Fractional::Whole => url.push_str("&fractional_ownership=1%2F1"),
                share => url.push_str(&format!(
                    "&fractional_ownership={}",
                    byte_serialize(share.as_str().as_bytes()).collect::<String>()
                )),
            }

            url.push_str(&format!("&user_distance={}", options.distance));
            url.push_str(&format!(
                "&category_level1={}",
                plus_spaces(options.aircraft_type.as_str())
            ));

            if let Some(group) = &options.model_group {
                url.push_str(&format!("&model_group={}", normalize_name(group)));
            }
            if let Some(model) = &options.model {
                url.push_str(&format!("&model={}", normalize_name(model)));
            }
            if let Some(make) = &options.make {
                url.push_str(&format!("&make={}", normalize_name(make)));
            }

            push_range(&mut url, "year", options.year.as_deref());
            push_range(&mut url, "total_time", options.total_time.as_deref());
            push_range(&mut url, "price", options.price.as_deref());

            if let Some(sort) = options.sort {
                url.push_str(&format!("&s-sort_key={}", sort));
                url.push_str(&format!("&s-sort_order={}", options.sort_order));
            }
        }
        Action::Category => {
            url.push_str("&s-type=aircraft");
            url.push_str(&format!(
                "&category_level1={}",
                plus_spaces(options.aircraft_type.as_str())
            ));
            url.push_str(&format!("&s-lvl={}", options.level.as_u8()));
        }
        Action::Listing => {
            url.push_str(&format!(
                "&listing_id={}",
                options.listing_id.as_deref().unwrap_or_default()
            ));
        }
    }

    url
}

/// Returns the URL of a specific result page
pub fn page_url(url: &str, page: u64) -> String {
    format!("{}&s-page={}", url, page)
}

fn plus_spaces(value: &str) -> String {
    value.replace(' ', "+")
}

/// Uppercases a free-text name and form-encodes it (spaces become `+`)
fn normalize_name(value: &str) -> String {
    let name = value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();
    encode(&name)
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

fn push_range(url: &mut String, name: &str, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };

    if let Some((min, max)) = parse_range(value).as_ref().and_then(|r| r.bounds()) {
        url.push_str(&format!("&{}-min={}", name, encode(min)));
        url.push_str(&format!("&{}-max={}", name, encode(max)));
    }
}
