//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end through the real HTTP fetcher.

use link_tally::config::Config;
use link_tally::crawler::{crawl, CrawlState, Crawler, HttpFetcher, NullReporter};
use link_tally::output::format_report;
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collects reported page errors
#[derive(Default)]
struct Messages(Mutex<Vec<String>>);

impl Messages {
    fn push(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }

    fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

fn html_linking_to(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">Link</a>"#, href))
        .collect();
    format!("<html><head><title>Test</title></head><body>{}</body></html>", anchors)
}

fn html_page(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

/// Mounts a GET mock for `page_path` that must be hit exactly `times` times
async fn mount_page(server: &MockServer, page_path: &str, template: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(template)
        .expect(times)
        .mount(server)
        .await;
}

/// The normalized key prefix for pages on the mock server (`127.0.0.1:PORT`)
fn host_key(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_lowercase()
}

#[tokio::test]
async fn test_full_crawl_follows_chain() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let host = host_key(&mock_server);

    mount_page(&mock_server, "/", html_page(html_linking_to(&["/path1"])), 1).await;
    mount_page(&mock_server, "/path1", html_page(html_linking_to(&["/path2"])), 1).await;
    mount_page(&mock_server, "/path2", html_page(html_linking_to(&[])), 1).await;

    let links = crawl(&base_url, &Config::default(), &NullReporter)
        .await
        .expect("Crawl failed");

    assert_eq!(links.len(), 2);
    assert_eq!(links.get(&format!("{}/path1", host)), Some(1));
    assert_eq!(links.get(&format!("{}/path2", host)), Some(1));

    // Wiremock verifies each page was fetched exactly once when the server drops
}

#[tokio::test]
async fn test_cross_domain_links_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(html_linking_to(&["https://other.domain/", "http://localhost:1/elsewhere"])),
        1,
    )
    .await;

    let links = crawl(&base_url, &Config::default(), &NullReporter)
        .await
        .expect("Crawl failed");

    assert!(links.is_empty());
}

#[tokio::test]
async fn test_each_page_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let host = host_key(&mock_server);

    mount_page(&mock_server, "/", html_page(html_linking_to(&["/a", "/b"])), 1).await;
    mount_page(&mock_server, "/a", html_page(html_linking_to(&["/b", "/a/"])), 1).await;
    mount_page(&mock_server, "/b", html_page(html_linking_to(&["/a"])), 1).await;

    let links = crawl(&base_url, &Config::default(), &NullReporter)
        .await
        .expect("Crawl failed");

    // "/a" from the seed, "/a/" from itself, "/a" from "/b"
    assert_eq!(links.get(&format!("{}/a", host)), Some(3));
    // from "/a" and from the seed
    assert_eq!(links.get(&format!("{}/b", host)), Some(2));
    assert_eq!(
        format_report(&links),
        format!("       2 {host}/b\n       3 {host}/a\n", host = host)
    );
}

#[tokio::test]
async fn test_reports_not_found() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", ResponseTemplate::new(404), 1).await;

    let messages = Messages::default();
    let reporter = |message: &str| messages.push(message);
    let links = crawl(&base_url, &Config::default(), &reporter)
        .await
        .expect("Crawl failed");

    assert!(links.is_empty());
    assert_eq!(messages.all(), vec![format!("{}: 404 Not Found", base_url)]);
}

#[tokio::test]
async fn test_reports_non_html_content() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let pdf_url = format!("{}/path", base_url);
    let mime = "application/pdf";

    mount_page(
        &mock_server,
        "/path",
        ResponseTemplate::new(200).set_body_raw("PDF data", mime),
        1,
    )
    .await;

    let messages = Messages::default();
    let reporter = |message: &str| messages.push(message);
    let crawler = Crawler::new(HttpFetcher::new(&Config::default()).unwrap());
    let mut state = CrawlState::new(&reporter);

    let links = crawler
        .crawl(&base_url, &pdf_url, &mut state)
        .await
        .expect("Crawl failed");

    assert!(links.is_empty());
    assert_eq!(messages.all(), vec![format!("{}: {}", pdf_url, mime)]);
}

#[tokio::test]
async fn test_reports_network_errors() {
    // Nothing listens on port 1
    let url = "http://127.0.0.1:1";

    let messages = Messages::default();
    let reporter = |message: &str| messages.push(message);
    let links = crawl(url, &Config::default(), &reporter)
        .await
        .expect("Crawl failed");

    assert!(links.is_empty());
    let reported = messages.all();
    assert_eq!(reported.len(), 1);
    assert!(
        reported[0].starts_with(&format!("{}: ", url)),
        "unexpected message: {}",
        reported[0]
    );
}

#[tokio::test]
async fn test_failed_pages_do_not_stop_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let host = host_key(&mock_server);

    mount_page(
        &mock_server,
        "/",
        html_page(html_linking_to(&["/broken", "/ok"])),
        1,
    )
    .await;
    mount_page(&mock_server, "/broken", ResponseTemplate::new(500), 1).await;
    mount_page(&mock_server, "/ok", html_page(html_linking_to(&["/deeper"])), 1).await;
    mount_page(&mock_server, "/deeper", html_page(html_linking_to(&[])), 1).await;

    let messages = Messages::default();
    let reporter = |message: &str| messages.push(message);
    let links = crawl(&base_url, &Config::default(), &reporter)
        .await
        .expect("Crawl failed");

    assert_eq!(links.len(), 3);
    assert_eq!(links.get(&format!("{}/broken", host)), Some(1));
    assert_eq!(links.get(&format!("{}/deeper", host)), Some(1));
    assert_eq!(
        messages.all(),
        vec![format!("{}/broken: 500 Internal Server Error", base_url)]
    );
}

#[tokio::test]
async fn test_redirects_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let host = host_key(&mock_server);

    mount_page(&mock_server, "/", html_page(html_linking_to(&["/old"])), 1).await;
    mount_page(
        &mock_server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", "/new"),
        1,
    )
    .await;
    mount_page(&mock_server, "/new", html_page(html_linking_to(&["/leaf"])), 1).await;
    mount_page(&mock_server, "/leaf", html_page(html_linking_to(&[])), 1).await;

    let links = crawl(&base_url, &Config::default(), &NullReporter)
        .await
        .expect("Crawl failed");

    // keyed under the requested URL, not the redirect target
    assert_eq!(links.get(&format!("{}/old", host)), Some(1));
    assert_eq!(links.get(&format!("{}/new", host)), None);
    assert_eq!(links.get(&format!("{}/leaf", host)), Some(1));
}

#[tokio::test]
async fn test_redirects_reported_when_disabled() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        ResponseTemplate::new(302).insert_header("location", "/elsewhere"),
        1,
    )
    .await;

    let mut config = Config::default();
    config.http.max_redirects = 0;

    let messages = Messages::default();
    let reporter = |message: &str| messages.push(message);
    let links = crawl(&base_url, &config, &reporter)
        .await
        .expect("Crawl failed");

    assert!(links.is_empty());
    assert_eq!(messages.all(), vec![format!("{}: 302 Found", base_url)]);
}

#[tokio::test]
async fn test_invalid_seed_is_an_error() {
    let result = crawl("not a url", &Config::default(), &NullReporter).await;
    assert!(result.is_err());
}
