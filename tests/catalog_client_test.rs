//! Catalog client tests against a mock volumes endpoint.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use bookscout::catalog::{CatalogClient, CatalogParser, CatalogSource, SearchRequest};
use bookscout::{Error, MaxResults};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{endpoint, volume, volumes, VOLUMES_PATH};

fn client(read_timeout: Duration) -> CatalogClient {
    CatalogClient::with_timeouts(Duration::from_secs(2), read_timeout, "bookscout-tests")
        .expect("catalog client")
}

#[tokio::test]
async fn fetch_sends_query_and_page_size() {
    let server = MockServer::start().await;
    let body = volumes(1, vec![volume("Dune", &["Frank Herbert"], 4.5, None)]);

    Mock::given(method("GET"))
        .and(path(VOLUMES_PATH))
        .and(query_param("q", "dune messiah"))
        .and(query_param("maxResults", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRequest::new("  dune messiah ", MaxResults::new(25).unwrap()).unwrap();
    let bytes = client(Duration::from_secs(5))
        .fetch(&request.url(&endpoint(&server)))
        .await
        .unwrap();

    let result = CatalogParser::default().parse(&bytes).unwrap();
    assert_eq!(result.total_items, 1);
    assert_eq!(result.books[0].title, "Dune");
}

#[tokio::test]
async fn non_ok_status_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VOLUMES_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let err = client(Duration::from_secs(5))
        .fetch(&endpoint(&server))
        .await
        .unwrap_err();

    assert_matches!(err, Error::Transport { status: Some(404), .. });
    assert!(err.is_run_failure());
}

#[tokio::test]
async fn server_error_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(Duration::from_secs(5))
        .fetch(&endpoint(&server))
        .await
        .unwrap_err();

    assert_eq!(err, Error::transport_status(503));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(volumes(0, vec![]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client(Duration::from_millis(200))
        .fetch(&endpoint(&server))
        .await
        .unwrap_err();

    assert_matches!(err, Error::Transport { status: None, .. });
}

#[tokio::test]
async fn empty_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let bytes = client(Duration::from_secs(5))
        .fetch(&endpoint(&server))
        .await
        .unwrap();

    assert!(bytes.is_empty());
    assert_matches!(CatalogParser::default().parse(&bytes), Err(Error::Parse(_)));
}
