//! Integration tests for the scraper
//!
//! These tests use wiremock to stand in for the search endpoint and run full
//! search and category runs end-to-end.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tap_scraper::config::{AircraftType, CategoryLevel, FetcherConfig, QueryOptions};
use tap_scraper::crawler::{list_categories, run_search, Fetcher, ListingRecord};
use tap_scraper::output::JsonLinesOutput;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches first-page search requests (no explicit page number)
struct FirstPage;

impl Match for FirstPage {
    fn matches(&self, request: &Request) -> bool {
        !request.url.query_pairs().any(|(key, _)| key == "s-page")
    }
}

/// Matches result pages numbered above the given page
struct PageAfter(u64);

impl Match for PageAfter {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .any(|(key, value)| {
                key == "s-page" && value.parse::<u64>().map_or(false, |page| page > self.0)
            })
    }
}

/// Creates a fetcher pointed at the mock server with a short retry delay
fn create_test_fetcher(server: &MockServer, max_retries: u32) -> Fetcher {
    let config = FetcherConfig {
        search_url: format!("{}/search?", server.uri()),
        max_retries,
        retry_delay: Duration::from_millis(5),
        ..FetcherConfig::default()
    };
    Fetcher::new(config).expect("Failed to build fetcher")
}

fn listing_block(id: u32) -> String {
    format!(
        r#"<div class="result_listing" data-listing_id="{id}" data-model_group="CITATION"
                data-seller_id="77">
            <div class="lst-title"><h3>
                <a href="/search?category_level1=Jets&make=CESSNA&model=CITATION+CJ3&listing_id={id}&s-type=aircraft">
                    2012 Cessna Citation CJ3 #{id}
                </a>
            </h3></div>
            <p class="txt-price">$4,950,000</p>
            <p class="txt-reg-num">Reg# N{id}CJ</p>
            <p class="txt-total-time">TT: 2100</p>
            <p class="address">Scottsdale, AZ</p>
            <p class="last-update">Last Update: 10/01/2026</p>
        </div>"#
    )
}

/// Builds a results page with the given heading and listing ids
fn results_page(heading: Option<&str>, ids: impl IntoIterator<Item = u32>) -> String {
    let heading = heading
        .map(|h| {
            format!(
                r#"<div id="search_results_area"><div class="search_options"><h2>{}</h2></div></div>"#,
                h
            )
        })
        .unwrap_or_default();
    let blocks: String = ids.into_iter().map(listing_block).collect();
    format!("<html><body>{}<div id=\"results\">{}</div></body></html>", heading, blocks)
}

fn detail_page(id: &str) -> String {
    format!(
        r#"<html><body>
        <div id="bottom_section"><div id="general_specs"><p>Specs for {id}</p></div></div>
        <div id="detailed_desc"><pre>Description for {id}</pre></div>
        <div id="avionics_equipment"><pre>Pro Line 21</pre></div>
        <div id="airframe"><pre>No damage history</pre></div>
        <div id="engines_mods"><pre>FJ44-3A</pre></div>
        <div id="interior_exterior"><pre>Leather, 7 seats</pre></div>
        <div id="remarks"><pre>Program engines</pre></div>
        </body></html>"#
    )
}

async fn mount_first_page(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("s-advanced", "yes"))
        .and(FirstPage)
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("s-page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn jets(number: Option<u64>, deep: bool) -> QueryOptions {
    QueryOptions {
        aircraft_type: AircraftType::Jets,
        number,
        deep,
        ..QueryOptions::default()
    }
}

#[tokio::test]
async fn test_capped_search_emits_json_lines() {
    let server = MockServer::start().await;
    mount_first_page(
        &server,
        results_page(Some("Showing 1-96 of 150 results"), 1..=4),
    )
    .await;

    // The cap fits on page 1, so page 2 is never requested
    Mock::given(method("GET"))
        .and(query_param("s-page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(None, 97..=100)))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = create_test_fetcher(&server, 3);
    let mut output = JsonLinesOutput::new(Vec::new());
    let emitted = run_search(&fetcher, &jets(Some(2), false), &mut output)
        .await
        .expect("Search failed");

    assert_eq!(emitted, 2);

    let text = String::from_utf8(output.into_inner()).unwrap();
    assert!(text.ends_with('\n'));
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("Each line must be a JSON object"))
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], "1");
    assert_eq!(lines[1]["id"], "2");
    assert_eq!(lines[0]["fetch_date"], lines[1]["fetch_date"]);
    assert!(lines[0]["fetch_date"].as_i64().unwrap() > 0);

    for line in &lines {
        assert_eq!(line["category"], "Jets");
        assert_eq!(line["make"], "CESSNA");
        assert_eq!(line["model"], "CITATION CJ3");
        assert_eq!(line["type"], "aircraft");
        assert_eq!(line["year"], "2012");
        assert_eq!(line["total_time"], "2100");
        assert!(line.get("specs").is_none());
        assert!(line.get("remarks").is_none());
    }
    assert_eq!(lines[0]["registration"], "N1CJ");
}

#[tokio::test]
async fn test_search_url_carries_query_options() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("category_level1", "Jets"))
        .and(query_param("fractional_ownership", "1/1"))
        .and(query_param("s-page_size", "96"))
        .and(query_param("make", "CESSNA"))
        .and(query_param("year-min", "2005"))
        .and(query_param("year-max", "2015"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(results_page(Some("Showing 1 - 1 of 1 result"), [5])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let options = QueryOptions {
        make: Some("cessna".to_string()),
        year: Some("2005-2015".to_string()),
        ..jets(None, false)
    };

    let fetcher = create_test_fetcher(&server, 1);
    let mut records: Vec<ListingRecord> = Vec::new();
    let emitted = run_search(&fetcher, &options, &mut records).await.unwrap();

    assert_eq!(emitted, 1);
    assert_eq!(records[0].id, "5");
}

#[tokio::test]
async fn test_remaining_pages_fetched_in_order() {
    let server = MockServer::start().await;
    mount_first_page(
        &server,
        results_page(Some("Showing 1 - 96 of 150 results"), 1..=3),
    )
    .await;
    mount_page(&server, 2, results_page(None, 4..=6)).await;

    let fetcher = create_test_fetcher(&server, 2);
    let mut records: Vec<ListingRecord> = Vec::new();
    let emitted = run_search(&fetcher, &jets(None, false), &mut records)
        .await
        .unwrap();

    assert_eq!(emitted, 6);
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(!requests[0].url.as_str().contains("s-page="));
    assert!(requests[1].url.as_str().ends_with("&s-page=2"));
}

#[tokio::test]
async fn test_cap_truncates_across_page_boundary() {
    let server = MockServer::start().await;
    mount_first_page(
        &server,
        results_page(Some("Showing 1 - 96 of 500 results"), 1..=96),
    )
    .await;
    mount_page(&server, 2, results_page(None, 97..=192)).await;

    let fetcher = create_test_fetcher(&server, 1);
    let mut records: Vec<ListingRecord> = Vec::new();
    let emitted = run_search(&fetcher, &jets(Some(100), false), &mut records)
        .await
        .unwrap();

    assert_eq!(emitted, 100);
    assert_eq!(records.len(), 100);
    assert_eq!(records.last().unwrap().id, "100");

    // 100 results over 96-listing pages is exactly two pages
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_implausible_result_count_stops_at_last_listing_page() {
    let server = MockServer::start().await;
    mount_first_page(
        &server,
        results_page(Some("Showing 1 - 96 of 100,000,000,000,000 results"), 1..=2),
    )
    .await;
    mount_page(&server, 2, results_page(None, 3..=4)).await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(PageAfter(2))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(results_page(None, std::iter::empty())),
        )
        .mount(&server)
        .await;

    let fetcher = create_test_fetcher(&server, 1);
    let mut records: Vec<ListingRecord> = Vec::new();
    let emitted = tokio::time::timeout(
        Duration::from_secs(10),
        run_search(&fetcher, &jets(None, false), &mut records),
    )
    .await
    .expect("run did not finish")
    .unwrap();

    assert_eq!(emitted, 4);
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);

    // Page 3 comes back empty and ends the walk
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_failed_middle_page_degrades() {
    let server = MockServer::start().await;
    mount_first_page(
        &server,
        results_page(Some("Showing 1 - 96 of 250 results"), 1..=2),
    )
    .await;
    Mock::given(method("GET"))
        .and(query_param("s-page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, 3, results_page(None, 3..=4)).await;

    let fetcher = create_test_fetcher(&server, 2);
    let mut records: Vec<ListingRecord> = Vec::new();
    let emitted = run_search(&fetcher, &jets(None, false), &mut records)
        .await
        .unwrap();

    assert_eq!(emitted, 4);
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_missing_result_count_emits_nothing() {
    let server = MockServer::start().await;
    mount_first_page(&server, results_page(None, 1..=4)).await;

    let fetcher = create_test_fetcher(&server, 1);
    let mut output = JsonLinesOutput::new(Vec::new());
    let emitted = run_search(&fetcher, &jets(None, false), &mut output)
        .await
        .unwrap();

    assert_eq!(emitted, 0);
    assert!(output.into_inner().is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_site_emits_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let fetcher = create_test_fetcher(&server, 3);
    let mut records: Vec<ListingRecord> = Vec::new();
    let emitted = run_search(&fetcher, &jets(None, false), &mut records)
        .await
        .unwrap();

    assert_eq!(emitted, 0);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_deep_mode_fetches_details() {
    let server = MockServer::start().await;
    mount_first_page(
        &server,
        results_page(Some("Showing 1 - 3 of 3 results"), 1..=3),
    )
    .await;
    for id in ["1", "2"] {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("listing_id", id))
            .respond_with(ResponseTemplate::new(200).set_body_string(detail_page(id)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let fetcher = create_test_fetcher(&server, 1);
    let options = jets(Some(2), true);
    let mut output = JsonLinesOutput::new(Vec::new());
    let emitted = run_search(&fetcher, &options, &mut output).await.unwrap();

    assert_eq!(emitted, 2);
    assert_eq!(options.listing_id, None);

    let text = String::from_utf8(output.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines[0]["specs"], "Specs for 1");
    assert_eq!(lines[0]["description"], "Description for 1");
    assert_eq!(lines[0]["avionics"], "Pro Line 21");
    assert_eq!(lines[0]["airframe"], "No damage history");
    assert_eq!(lines[0]["engine"], "FJ44-3A");
    assert_eq!(lines[0]["int_ext"], "Leather, 7 seats");
    assert_eq!(lines[0]["remarks"], "Program engines");
    assert_eq!(lines[1]["specs"], "Specs for 2");

    // First page, then one detail page per emitted listing, in order
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    assert!(requests[1].url.as_str().ends_with("&listing_id=1"));
    assert!(requests[2].url.as_str().ends_with("&listing_id=2"));
}

#[tokio::test]
async fn test_deep_mode_missing_detail_page() {
    let server = MockServer::start().await;
    mount_first_page(
        &server,
        results_page(Some("Showing 1 - 1 of 1 result"), [8]),
    )
    .await;
    Mock::given(method("GET"))
        .and(query_param("listing_id", "8"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = create_test_fetcher(&server, 2);
    let mut records: Vec<ListingRecord> = Vec::new();
    run_search(&fetcher, &jets(None, true), &mut records)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let details = records[0].details.as_ref().expect("Deep record has details");
    assert_eq!(details.specs, "");
    assert_eq!(details.remarks, "");
}

#[tokio::test]
async fn test_fetch_succeeds_on_last_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(4)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("finally"))
        .mount(&server)
        .await;

    let fetcher = create_test_fetcher(&server, 5);
    let body = fetcher.fetch(&format!("{}/flaky", server.uri())).await;

    assert_eq!(body, "finally");
    assert_eq!(server.received_requests().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_fetch_gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = create_test_fetcher(&server, 5);
    let body = fetcher.fetch(&format!("{}/down", server.uri())).await;

    assert_eq!(body, "");
    assert_eq!(server.received_requests().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_non_200_success_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/created"))
        .respond_with(ResponseTemplate::new(201).set_body_string("not this"))
        .mount(&server)
        .await;

    let fetcher = create_test_fetcher(&server, 2);
    let body = fetcher.fetch(&format!("{}/created", server.uri())).await;

    assert_eq!(body, "");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_retry_waits_fixed_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = FetcherConfig {
        search_url: format!("{}/search?", server.uri()),
        max_retries: 3,
        retry_delay: Duration::from_millis(100),
        ..FetcherConfig::default()
    };
    let fetcher = Fetcher::new(config).unwrap();

    let start = Instant::now();
    fetcher.fetch(&format!("{}/slow", server.uri())).await;

    // Two waits between three attempts
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_concurrent_fetches_are_serialized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("ok")
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;

    let fetcher = Arc::new(create_test_fetcher(&server, 1));
    let url = format!("{}/page", server.uri());

    let start = Instant::now();
    let (first, second) = tokio::join!(fetcher.fetch(&url), fetcher.fetch(&url));

    assert_eq!(first, "ok");
    assert_eq!(second, "ok");
    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_list_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("category_level1", "Piston Helicopters"))
        .and(query_param("s-lvl", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><div class="column"><ul>
                <li><a title="Robinson" href="/r">Robinson</a></li>
                <li><a title=" Schweizer " href="/s">Schweizer</a></li>
                <li><a title="Show All Makes" href="/all">All</a></li>
            </ul></div></body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = create_test_fetcher(&server, 1);
    let options = QueryOptions {
        aircraft_type: AircraftType::PistonHelicopters,
        level: CategoryLevel::Two,
        ..QueryOptions::default()
    };

    let levels = list_categories(&fetcher, &options).await;
    assert_eq!(levels, vec!["Robinson", "Schweizer"]);
}
