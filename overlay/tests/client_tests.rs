//! Integration tests for the decorating client.

use chrono::{TimeZone, Utc};
use futures::StreamExt;
use http::header::{HeaderName, HeaderValue};
use http::{Method, StatusCode};
use overlay::{Client, ClientError, HeaderOverrides, OverlayClient, RequestOptions, Response};
use overlay_test::assert::{assert_header_absent, assert_single_header};
use overlay_test::capture::create_event_collector;
use overlay_test::client::StubClient;
use overlay_test::clock::FrozenClock;
use overlay_test::response::StubResponse;
use pretty_assertions::assert_eq;
use serde_json::json;

fn name(name: &'static str) -> HeaderName {
    HeaderName::from_static(name)
}

fn value(value: &'static str) -> HeaderValue {
    HeaderValue::from_static(value)
}

/// Every response handed out by the client carries its override set; status
/// and body pass through untouched.
#[tokio::test]
async fn wraps_responses_with_the_client_override_set() {
    let stub = StubClient::with_responses([StubResponse::builder()
        .status(StatusCode::CREATED)
        .header(name("h1"), value("a"))
        .header(name("h2"), value("b"))
        .body("payload")
        .build()]);
    let overrides = HeaderOverrides::new()
        .set(name("h1"), value("a2"))
        .unset(name("h2"));
    let client = OverlayClient::new(stub, overrides);

    let response = client
        .request(Method::GET, "https://example.com/data", RequestOptions::new())
        .await
        .unwrap();

    let headers = response.headers(true).await.unwrap();
    assert_single_header(&headers, "h1", "a2");
    assert_header_absent(&headers, "h2");
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.text(true).await.unwrap(), "payload");
}

/// The request is recorded by the inner client exactly as issued.
#[tokio::test]
async fn delegates_requests_verbatim() {
    let stub = StubClient::with_responses([StubResponse::builder().build()]);
    let client = OverlayClient::new(stub.clone(), HeaderOverrides::new());

    let mut options = RequestOptions::new();
    options.insert("timeout".into(), json!(30));
    client
        .request(Method::POST, "https://example.com/items", options.clone())
        .await
        .unwrap();

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].url, "https://example.com/items");
    assert_eq!(requests[0].options, options);
}

/// Errors raised by the inner client propagate unchanged.
#[tokio::test]
async fn propagates_inner_request_errors() {
    let client = OverlayClient::new(StubClient::failing("boom"), HeaderOverrides::new());

    let error = client
        .request(Method::GET, "https://example.com/", RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(error, ClientError::Other(_)));
    assert_eq!(error.to_string(), "boom");
}

/// Streamed reads bypass the overlay: the inner client receives the raw
/// responses and their headers stay unmodified.
#[tokio::test]
async fn streams_are_not_enriched() {
    let stub = StubClient::new();
    for _ in 0..2 {
        stub.push(
            StubResponse::builder()
                .header(name("pragma"), value("no-cache"))
                .build(),
        );
    }
    let overrides = HeaderOverrides::new().unset(name("pragma"));
    let client = OverlayClient::new(stub, overrides);

    let first = client
        .request(Method::GET, "https://example.com/a", RequestOptions::new())
        .await
        .unwrap();
    let second = client
        .request(Method::GET, "https://example.com/b", RequestOptions::new())
        .await
        .unwrap();

    // Decorated reads hide the header...
    assert_header_absent(&first.headers(true).await.unwrap(), "pragma");

    // ...but the stream yields the raw responses, header intact.
    let raw: Vec<StubResponse> = client.stream(vec![first, second], None).collect().await;
    assert_eq!(raw.len(), 2);
    for response in &raw {
        assert_single_header(&response.headers(true).await.unwrap(), "pragma", "no-cache");
    }
}

/// `with_options` reconfigures a sibling and leaves the original untouched.
#[tokio::test]
async fn with_options_returns_an_untouched_sibling() {
    let stub = StubClient::with_responses([
        StubResponse::builder().header(name("h2"), value("b")).build(),
        StubResponse::builder().header(name("h2"), value("b")).build(),
    ]);
    let overrides = HeaderOverrides::new().unset(name("h2"));
    let client = OverlayClient::new(stub.clone(), overrides);

    let mut options = RequestOptions::new();
    options.insert("base_uri".into(), json!("https://example.com"));
    let sibling = client.with_options(options.clone()).unwrap();

    assert_eq!(stub.applied_options(), vec![options]);
    assert!(!sibling.overrides().is_empty());

    // Both instances decorate with the same override set.
    for client in [&client, &sibling] {
        let response = client
            .request(Method::GET, "https://example.com/", RequestOptions::new())
            .await
            .unwrap();
        assert_header_absent(&response.headers(true).await.unwrap(), "h2");
    }
}

/// The cache profile pins the documented header set at the clock's instant
/// and strips `pragma` even when the origin sent it.
#[tokio::test]
async fn cache_profile_overrides_cache_headers() {
    let stub = StubClient::with_responses([StubResponse::builder()
        .header(name("etag"), value("origin-etag"))
        .header(name("pragma"), value("no-cache"))
        .header(name("age"), value("42"))
        .header(name("x-origin"), value("kept"))
        .build()]);
    let clock = FrozenClock::at(Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap());
    let client = OverlayClient::cache_expires_in(10, stub, &clock);

    let response = client
        .request(Method::GET, "https://example.com/cached", RequestOptions::new())
        .await
        .unwrap();

    let headers = response.headers(true).await.unwrap();
    assert_single_header(&headers, "etag", "always-same-etag");
    assert_single_header(&headers, "cache-control", "public, max-age=10");
    assert_single_header(&headers, "age", "0");
    assert_single_header(&headers, "expires", "Wed, 21 Oct 2015 07:28:10 GMT");
    assert_header_absent(&headers, "pragma");
    assert_single_header(&headers, "x-origin", "kept");
}

/// Each request is reported on the diagnostic channel with its method and
/// URL.
#[tokio::test]
async fn reports_requests_on_the_diagnostic_channel() {
    let collector = create_event_collector();
    let _guard = tracing::dispatcher::set_default(collector.dispatch());

    let stub = StubClient::with_responses([StubResponse::builder().build()]);
    let client = OverlayClient::new(stub, HeaderOverrides::new());
    client
        .request(Method::GET, "https://example.com/users", RequestOptions::new())
        .await
        .unwrap();

    assert!(collector.has_message("HTTP request sent"));
    let event = collector.get_event("HTTP request sent").unwrap();
    assert_eq!(event.target, "overlay::client");
    assert_eq!(event.field("method"), Some("GET"));
    assert_eq!(event.field("url"), Some("https://example.com/users"));
}
