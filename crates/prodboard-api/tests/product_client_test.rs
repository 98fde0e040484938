#![allow(clippy::unwrap_used)]
// Integration tests for `ProductClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prodboard_api::{Error, ProductBody, ProductClient, RecordId, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ProductClient) {
    let server = MockServer::start().await;
    let client = ProductClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn body(name: &str, price: i64, description: &str) -> ProductBody {
    ProductBody {
        name: name.into(),
        price,
        description: description.into(),
    }
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_products() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 1, "name": "A", "price": 10, "description": "first" },
                { "id": "sku-2", "name": "B", "price": 5, "description": "second" },
            ]
        })))
        .mount(&server)
        .await;

    let products = client.list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, RecordId::Number(1));
    assert_eq!(products[0].name, "A");
    assert_eq!(products[1].id, RecordId::Text("sku-2".into()));
    assert_eq!(products[1].price, 5);
}

#[tokio::test]
async fn test_create_product_sends_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(body_json(json!({ "name": "C", "price": 20, "description": "x" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": 3, "name": "C", "price": 20, "description": "x" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_product(&body("C", 20, "x")).await.unwrap();

    assert_eq!(created.id, RecordId::Number(3));
    assert_eq!(created.name, "C");
    assert_eq!(created.price, 20);
    assert_eq!(created.description.as_deref(), Some("x"));
}

#[tokio::test]
async fn test_update_product() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/products/2"))
        .and(body_json(json!({ "name": "B2", "price": 7, "description": "" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": 2, "name": "B2", "price": 7, "description": "" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .update_product(&RecordId::Number(2), &body("B2", 7, ""))
        .await
        .unwrap();

    assert_eq!(updated.name, "B2");
    assert_eq!(updated.price, 7);
}

#[tokio::test]
async fn test_delete_ignores_response_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Deleted"))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete_product(&RecordId::Text("abc".into()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    let transport =
        TransportConfig::default().with_bearer_token(secrecy::SecretString::from("tok"));
    let client = ProductClient::new(&server.uri(), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.list_products().await.unwrap().is_empty());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_message_surfaced_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Name is required" })),
        )
        .mount(&server)
        .await;

    let err = client.create_product(&body("", 1, "")).await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Name is required");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_falls_back_to_raw_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/products/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such product"))
        .mount(&server)
        .await;

    let err = client
        .update_product(&RecordId::Number(9), &body("n", 1, "d"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, Error::Api { ref message, .. } if message == "no such product"));
}

#[tokio::test]
async fn test_error_falls_back_to_status_text() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client
        .delete_product(&RecordId::Number(1))
        .await
        .unwrap_err();

    assert!(err.is_transient());
    assert!(
        matches!(err, Error::Api { status: 500, ref message } if message == "Internal Server Error")
    );
}

#[tokio::test]
async fn test_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.list_products().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(
        matches!(err, Error::Unauthorized { ref message } if message == "the API token was rejected")
    );
}

#[tokio::test]
async fn test_unauthorized_keeps_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "Session expired, log in again" })),
        )
        .mount(&server)
        .await;

    let err = client.create_product(&body("Lamp", 30, "")).await.unwrap_err();
    match err {
        Error::Unauthorized { message } => assert_eq!(message, "Session expired, log in again"),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_products().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client =
        ProductClient::from_reqwest("http://127.0.0.1:9", reqwest::Client::new()).unwrap();

    let err = client.list_products().await.unwrap_err();
    assert!(err.is_transport());
}
