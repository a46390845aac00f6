//! End-to-end tests of the reqwest transport against a local mock of `rest/message`.

use std::net::TcpListener;
use std::time::Duration;

use clickatell::{
    ClickatellClient, ClickatellError, Credentials, ErrorKind, MAX_BATCH_RECIPIENTS,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(endpoint: &str) -> ClickatellClient {
    ClickatellClient::builder(Credentials::new("test_token").unwrap())
        .endpoint(endpoint)
        .bulk_batch_delay(Duration::ZERO)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn phones(count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("2799900{idx:04}")).collect()
}

#[tokio::test]
async fn posts_json_with_provider_headers() {
    let mock_server = MockServer::start().await;

    let response_body = json!({
        "data": {
            "message": [
                { "accepted": true, "to": "27999000001", "apiMessageId": "a1" },
                { "accepted": true, "to": "27999000002", "apiMessageId": "b2" }
            ]
        }
    });

    Mock::given(method("POST"))
        .and(path("/rest/message"))
        .and(header("authorization", "bearer test_token"))
        .and(header("x-version", "1"))
        .and(header("contenttype", "application/json"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "text": "hello",
            "to": ["27999000001", "27999000002"]
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(&response_body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&format!("{}/rest/message", mock_server.uri()));
    let response = client
        .send_message("hello", ["27999000001", "27999000002"])
        .await
        .unwrap();

    assert!(response.success);
    let pairs = response
        .messages
        .iter()
        .map(|m| (m.api_message_id.as_deref(), m.to.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        pairs,
        vec![(Some("a1"), "27999000001"), (Some("b2"), "27999000002")]
    );
}

#[tokio::test]
async fn too_many_requests_is_a_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/message"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&mock_server)
        .await;

    let client = client_for(&format!("{}/rest/message", mock_server.uri()));
    let err = client
        .send_message("hello", ["27999000001"])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Provider);
    assert_eq!(err.status(), Some(429));
    match err {
        ClickatellError::HttpStatus { body, .. } => {
            assert_eq!(body.as_deref(), Some("slow down"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn bulk_send_posts_one_request_per_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "message": [ { "to": "27999000000", "apiMessageId": "x" } ] }
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&format!("{}/rest/message", mock_server.uri()));
    let response = client
        .send_message("hello", phones(MAX_BATCH_RECIPIENTS + 1))
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.messages.len(), 2);
    assert_eq!(response.raw_bodies.len(), 2);

    let requests = mock_server.received_requests().await.unwrap();
    let sizes = requests
        .iter()
        .map(|request| {
            let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
            body["to"].as_array().unwrap().len()
        })
        .collect::<Vec<_>>();
    assert_eq!(sizes, vec![MAX_BATCH_RECIPIENTS, 1]);
}

#[tokio::test]
async fn unexpected_body_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&format!("{}/rest/message", mock_server.uri()));
    let err = client
        .send_message("hello", ["27999000001"])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Provider);
    assert!(matches!(err, ClickatellError::Parse(_)));
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let endpoint = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}/rest/message", listener.local_addr().unwrap())
    };

    let client = client_for(&endpoint);
    let err = client
        .send_message("hello", ["27999000001"])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Provider);
    assert!(matches!(err, ClickatellError::Transport(_)));
}

#[tokio::test]
async fn validation_failure_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&format!("{}/rest/message", mock_server.uri()));
    let err = client
        .send_message("", ["27999000001"])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}
