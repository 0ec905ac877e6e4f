use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use smoke_rust::client::Client;
use smoke_rust::load::{self, LoadOptions};

// scaled-down copy of the production options so the test stays fast
const OPTIONS: LoadOptions = LoadOptions {
    vus: 4,
    duration: Duration::from_millis(500),
    pause: Duration::from_millis(50),
};

#[tokio::test]
async fn test_load_run_counts_every_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let client = Client::with_base_url(server.uri());
    let report = load::run(&client, OPTIONS).await;

    assert!(report.all_ok());
    assert!(report.requests >= OPTIONS.vus as u64);
    assert!(report.elapsed >= OPTIONS.duration);
}

#[tokio::test]
async fn test_load_run_tallies_failures_and_still_completes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = Client::with_base_url(server.uri());
    let report = load::run(&client, OPTIONS).await;

    assert!(!report.all_ok());
    assert!(report.requests > 0);
    assert_eq!(report.failures, report.requests);
}
