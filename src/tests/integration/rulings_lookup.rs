//! Rulings client against a mock API: rulings, no rulings, and the two
//! kinds of failure stay distinguishable.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::rulings::{Ruling, RulingsError};
use crate::tests::common::*;

const RULINGS_PATH: &str = "/cards/doji-whisperer/rulings";

#[tokio::test]
async fn test_rulings_returned_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RULINGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                {"source": "Rules Reference", "text": "First.", "link": "https://example.com/rrg"},
                {"source": "Designer ruling", "text": "Second."}
            ],
            "size": 2
        })))
        .mount(&server)
        .await;

    let rulings = mock_rulings(&server).rulings("doji-whisperer").await.unwrap();
    assert_eq!(
        rulings,
        vec![
            Ruling {
                source: "Rules Reference".into(),
                text: Some("First.".into()),
                link: Some("https://example.com/rrg".into()),
            },
            Ruling {
                source: "Designer ruling".into(),
                text: Some("Second.".into()),
                link: None,
            },
        ]
    );
}

#[tokio::test]
async fn test_no_rulings_is_empty_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RULINGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
        .mount(&server)
        .await;

    let rulings = mock_rulings(&server).rulings("doji-whisperer").await.unwrap();
    assert!(rulings.is_empty());
}

#[tokio::test]
async fn test_non_200_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RULINGS_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = mock_rulings(&server).rulings("doji-whisperer").await.unwrap_err();
    assert!(matches!(err, RulingsError::Status { status: 404 }));
}

#[tokio::test]
async fn test_bad_body_is_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RULINGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = mock_rulings(&server).rulings("doji-whisperer").await.unwrap_err();
    assert!(matches!(err, RulingsError::Json(_)));
}

#[tokio::test]
async fn test_error_body_without_records_is_not_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RULINGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Internal error"
        })))
        .mount(&server)
        .await;

    let err = mock_rulings(&server).rulings("doji-whisperer").await.unwrap_err();
    assert!(matches!(err, RulingsError::Json(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_http_error() {
    let client = crate::core::rulings::RulingsClient::new(reqwest::Client::new(), "http://127.0.0.1:9");
    let err = client.rulings("doji-whisperer").await.unwrap_err();
    assert!(matches!(err, RulingsError::Http(_)));
}
