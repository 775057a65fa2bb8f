//! Integration tests for the commerce query client against wiremock.

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cmsync_core::app_config::{AppConfig, Dataset};
use cmsync_engine::{CommerceClient, ProductSource, SourceError};

fn test_config() -> AppConfig {
    AppConfig {
        api_token: "test-token".to_string(),
        project_id: "proj1".to_string(),
        api_version: "2024-01-01".to_string(),
        dataset: Dataset::Production,
        commerce_url: "http://localhost:9000".to_string(),
        studio_url: None,
        product_type_name: None,
        batch_size: 200,
        request_timeout_secs: 30,
        user_agent: "cmsync/test".to_string(),
        log_level: "info".to_string(),
    }
}

fn page_body() -> Value {
    json!({
        "data": [
            { "id": "prod_1", "title": "One", "handle": "one" },
            { "id": "prod_2", "title": "Two", "handle": "two" },
        ],
        "metadata": { "count": 42 }
    })
}

#[tokio::test]
async fn fetch_page_sends_pagination_and_parses_the_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_partial_json(json!({
            "entity": "product",
            "pagination": { "skip": 40, "take": 20, "order": { "id": "ASC" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CommerceClient::with_base_url(&test_config(), &server.uri())
        .expect("client construction should not fail");
    let page = client
        .fetch_page(None, 40, 20)
        .await
        .expect("query should succeed");

    assert_eq!(page.count, 42);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].id, "prod_1");
    assert_eq!(page.data[1].title.as_deref(), Some("Two"));
}

#[tokio::test]
async fn fetch_page_omits_the_id_filter_when_unfiltered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .mount(&server)
        .await;

    let client = CommerceClient::with_base_url(&test_config(), &server.uri())
        .expect("client construction should not fail");
    client
        .fetch_page(None, 0, 200)
        .await
        .expect("query should succeed");

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).expect("request body is JSON");
    assert!(body["filters"].get("id").is_none());
}

#[tokio::test]
async fn fetch_page_forwards_the_id_filter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_partial_json(json!({
            "filters": { "id": ["prod_7", "prod_9"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CommerceClient::with_base_url(&test_config(), &server.uri())
        .expect("client construction should not fail");
    let ids = vec!["prod_7".to_string(), "prod_9".to_string()];
    client
        .fetch_page(Some(&ids), 0, 200)
        .await
        .expect("query should succeed");
}

#[tokio::test]
async fn fetch_page_reports_unexpected_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = CommerceClient::with_base_url(&test_config(), &server.uri())
        .expect("client construction should not fail");
    let err = client
        .fetch_page(None, 0, 200)
        .await
        .expect_err("a 502 must surface as an error");

    match err {
        SourceError::UnexpectedStatus { status, .. } => assert_eq!(status, 502),
        other => panic!("unexpected error variant: {other}"),
    }
}

#[tokio::test]
async fn fetch_page_reports_malformed_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = CommerceClient::with_base_url(&test_config(), &server.uri())
        .expect("client construction should not fail");
    let err = client
        .fetch_page(None, 0, 200)
        .await
        .expect_err("garbage must surface as an error");
    assert!(matches!(err, SourceError::Deserialize { .. }));
}

#[tokio::test]
async fn missing_metadata_defaults_to_an_empty_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = CommerceClient::with_base_url(&test_config(), &server.uri())
        .expect("client construction should not fail");
    let page = client
        .fetch_page(None, 0, 200)
        .await
        .expect("query should succeed");
    assert_eq!(page.count, 0);
    assert!(page.data.is_empty());
}
