//! RestClient against a mock HTTP endpoint

use rest_wire::connection::ConnectionState;
use rest_wire::{Cursor, Error, RestClient};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: u64,
    name: String,
}

async fn api_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_connect_from_connection_string() {
    let server = api_server().await;

    let client = RestClient::connect(&format!("{}/api/?alias=main", server.uri()))
        .await
        .expect("connect");

    assert_eq!(client.connection().alias(), "main");
    assert_eq!(client.connection().state(), ConnectionState::Connected);
    assert!(client.connection().autocommit());
    assert!(client.is_usable().await);
}

#[tokio::test]
async fn test_get_json_uses_credentials() {
    let server = api_server().await;
    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "ada"},
            {"id": 2, "name": "grace"}
        ])))
        .mount(&server)
        .await;

    let dsn = server.uri().replace("http://", "http://admin:secret@") + "/api/";
    let client = RestClient::connect(&dsn).await.unwrap();

    let users: Vec<User> = client.get_json("users/").await.unwrap();
    assert_eq!(
        users,
        vec![
            User { id: 1, name: "ada".into() },
            User { id: 2, name: "grace".into() },
        ]
    );
}

#[tokio::test]
async fn test_get_json_error_status() {
    let server = api_server().await;
    Mock::given(method("GET"))
        .and(path("/api/missing/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = RestClient::connect(&format!("{}/api/", server.uri()))
        .await
        .unwrap();

    match client.get_json::<serde_json::Value>("missing/").await {
        Err(Error::Transport(e)) => assert_eq!(e.status().map(|s| s.as_u16()), Some(404)),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connect_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let url = format!("{}/api/", server.uri());
    let err = RestClient::connect(&url).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("bad credentials for database default on {}", url)
    );
}

#[tokio::test]
async fn test_connect_bad_connection_string() {
    let err = RestClient::connect("invalid://connection/string")
        .await
        .unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn test_cursor_is_unsupported() {
    let server = api_server().await;
    let client = RestClient::connect(&format!("{}/api/?auth=rest_wire.auth.NoAuth", server.uri()))
        .await
        .unwrap();

    let mut cursor = client.cursor();
    assert!(matches!(cursor.execute("SELECT 1"), Err(Error::NotSupported(_))));
}

#[tokio::test]
async fn test_session_missing_after_disconnect() {
    let server = api_server().await;
    let mut client = RestClient::connect(&format!("{}/api/", server.uri()))
        .await
        .unwrap();

    client.connection_mut().disconnect().unwrap();
    assert!(matches!(client.session(), Err(Error::InvalidState { .. })));
    assert!(!client.is_usable().await);
}
