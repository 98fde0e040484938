#![allow(clippy::unwrap_used)]
// Controller behaviour against a mocked products API.

use std::time::Duration;

use futures::StreamExt;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prodboard_core::{
    Command, CommandResult, ConnectionState, Controller, ControllerConfig, CoreError, Product,
    ProductDraft, ProductId, Session, SortKey,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Controller) {
    let server = MockServer::start().await;
    let config = ControllerConfig {
        url: server.uri().parse().unwrap(),
        ..ControllerConfig::default()
    };
    let controller = Controller::new(config);
    controller.connect().await.unwrap();
    (server, controller)
}

async fn mount_list(server: &MockServer, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(server)
        .await;
}

fn two_products() -> serde_json::Value {
    json!([
        { "id": 1, "name": "A", "price": 10, "description": "first" },
        { "id": 2, "name": "B", "price": 5, "description": "second" },
    ])
}

fn names(controller: &Controller) -> Vec<String> {
    controller
        .products_snapshot()
        .iter()
        .map(|p| p.name.clone())
        .collect()
}

// ── Lifecycle ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_commands_require_connection() {
    let controller = Controller::new(ControllerConfig::default());
    assert_eq!(
        *controller.connection_state().borrow(),
        ConnectionState::Disconnected
    );

    let err = controller.load().await.unwrap_err();
    assert!(matches!(err, CoreError::ControllerDisconnected));

    let err = controller.delete(ProductId::Number(1)).await.unwrap_err();
    assert!(matches!(err, CoreError::ControllerDisconnected));
}

#[tokio::test]
async fn test_connect_and_disconnect_states() {
    let (_server, controller) = setup().await;
    assert_eq!(
        *controller.connection_state().borrow(),
        ConnectionState::Connected
    );
    controller.disconnect().await;
    assert_eq!(
        *controller.connection_state().borrow(),
        ConnectionState::Disconnected
    );
}

// ── Load ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_replaces_collection() {
    let (server, controller) = setup().await;
    mount_list(&server, two_products()).await;

    assert_eq!(controller.load().await.unwrap(), 2);
    assert_eq!(names(&controller), vec!["A", "B"]);

    // A second load replaces rather than appends.
    assert_eq!(controller.load().await.unwrap(), 2);
    assert_eq!(controller.store().len(), 2);
}

#[tokio::test]
async fn test_load_accepts_null_description() {
    let (server, controller) = setup().await;
    mount_list(
        &server,
        json!([
            { "id": 1, "name": "A", "price": 10, "description": "first" },
            { "id": 2, "name": "B", "price": 5, "description": null },
        ]),
    )
    .await;

    assert_eq!(controller.load().await.unwrap(), 2);
    let snapshot = controller.products_snapshot();
    assert_eq!(snapshot[1].name, "B");
    assert_eq!(snapshot[1].description, "");
}

#[tokio::test]
async fn test_failed_load_leaves_collection_unchanged() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .mount(&server)
        .await;

    let err = controller.load().await.unwrap_err();
    assert_eq!(err.to_string(), "db down");
    assert!(controller.store().is_empty());
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_appends_server_item() {
    let (server, controller) = setup().await;
    mount_list(&server, two_products()).await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(body_json(json!({ "name": "C", "price": 20, "description": "x" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": 3, "name": "C", "price": 20, "description": "x" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    controller.load().await.unwrap();
    let created = controller
        .create(ProductDraft::new("C", "20", "x"))
        .await
        .unwrap();

    let expected = Product {
        id: ProductId::Number(3),
        name: "C".into(),
        price: 20,
        description: "x".into(),
    };
    assert_eq!(created, expected);

    let snapshot = controller.products_snapshot();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(*snapshot[2], expected);
}

#[tokio::test]
async fn test_create_truncates_fractional_price() {
    let (server, controller) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(body_json(json!({ "name": "D", "price": 20, "description": "" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": "d-1", "name": "D", "price": 20, "description": "" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = controller
        .create(ProductDraft::new("D", "20.9", ""))
        .await
        .unwrap();
    assert_eq!(created.id, ProductId::from("d-1"));
}

#[tokio::test]
async fn test_invalid_price_sends_nothing() {
    let (server, controller) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = controller
        .create(ProductDraft::new("E", "cheap", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));
    assert!(controller.store().is_empty());
}

#[tokio::test]
async fn test_rejected_create_surfaces_message() {
    let (server, controller) = setup().await;
    mount_list(&server, two_products()).await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Name already taken" })),
        )
        .mount(&server)
        .await;

    controller.load().await.unwrap();
    let version = controller.store().version();

    let err = controller
        .create(ProductDraft::new("A", "1", ""))
        .await
        .unwrap_err();

    assert!(err.is_application());
    assert_eq!(err.to_string(), "Name already taken");
    assert_eq!(controller.store().len(), 2);
    assert_eq!(controller.store().version(), version);
}

#[tokio::test]
async fn test_unauthorized_create_surfaces_server_message() {
    let (server, controller) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "Session expired, log in again" })),
        )
        .mount(&server)
        .await;

    let err = controller
        .create(ProductDraft::new("A", "1", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    assert_eq!(err.to_string(), "Session expired, log in again");
    assert!(controller.store().is_empty());
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_replaces_matching_item_only() {
    let (server, controller) = setup().await;
    mount_list(&server, two_products()).await;

    Mock::given(method("PUT"))
        .and(path("/api/products/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": 2, "name": "B2", "price": 7, "description": "changed" }
        })))
        .mount(&server)
        .await;

    controller.load().await.unwrap();
    let updated = controller
        .update(ProductId::Number(2), ProductDraft::new("B2", "7", "changed"))
        .await
        .unwrap();

    assert_eq!(updated.price, 7);
    let snapshot = controller.products_snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].name, "A");
    assert_eq!(snapshot[0].price, 10);
    assert_eq!(snapshot[1].name, "B2");
    assert_eq!(snapshot[1].description, "changed");
}

#[tokio::test]
async fn test_failed_update_leaves_collection() {
    let (server, controller) = setup().await;
    mount_list(&server, two_products()).await;

    Mock::given(method("PUT"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "gone" })))
        .mount(&server)
        .await;

    controller.load().await.unwrap();
    let err = controller
        .update(ProductId::Number(1), ProductDraft::new("Z", "1", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::NotFound { .. }));
    assert_eq!(names(&controller), vec!["A", "B"]);
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_removes_item() {
    let (server, controller) = setup().await;
    mount_list(&server, two_products()).await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    controller.load().await.unwrap();
    let result = controller
        .execute(Command::Delete {
            id: ProductId::Number(1),
        })
        .await
        .unwrap();

    assert_eq!(
        result,
        CommandResult::Deleted {
            id: ProductId::Number(1),
            removed: 1
        }
    );
    assert_eq!(names(&controller), vec!["B"]);
    assert!(
        controller
            .products_snapshot()
            .iter()
            .all(|p| p.id != ProductId::Number(1))
    );
}

#[tokio::test]
async fn test_failed_delete_keeps_item() {
    let (server, controller) = setup().await;
    mount_list(&server, two_products()).await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    controller.load().await.unwrap();
    assert!(controller.delete(ProductId::Number(1)).await.is_err());
    assert_eq!(controller.store().len(), 2);
}

// ── Transport failures ──────────────────────────────────────────────

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let config = ControllerConfig {
        url: "http://127.0.0.1:9".parse().unwrap(),
        timeout: Duration::from_secs(2),
        ..ControllerConfig::default()
    };
    let controller = Controller::new(config);
    controller.connect().await.unwrap();

    let err = controller.load().await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got {err:?}");
}

// ── Streams and sessions ────────────────────────────────────────────

#[tokio::test]
async fn test_stream_sees_mutations() {
    let (server, controller) = setup().await;
    mount_list(&server, two_products()).await;

    let mut stream = controller.products();
    assert!(stream.current().is_empty());

    controller.load().await.unwrap();
    let snap = stream.changed().await.unwrap();
    assert_eq!(snap.len(), 2);

    let mut items = controller.products().into_stream();
    let first = items.next().await.unwrap();
    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn test_session_view_over_controller_snapshot() {
    let (server, controller) = setup().await;
    mount_list(&server, two_products()).await;
    controller.load().await.unwrap();

    let mut session = Session::new(5);
    session.request_sort(SortKey::Price);
    let view = session.view(&controller.products_snapshot());
    assert_eq!(view.page_count, 1);
    assert_eq!(view.items[0].name, "B");
    assert_eq!(view.items[1].name, "A");

    session.request_sort(SortKey::Price);
    let view = session.view(&controller.products_snapshot());
    assert_eq!(view.items[0].name, "A");
}

#[tokio::test]
async fn test_modal_round_trip_through_controller() {
    let (server, controller) = setup().await;
    mount_list(&server, two_products()).await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "bad" })))
        .mount(&server)
        .await;

    controller.load().await.unwrap();
    let mut session = Session::new(5);
    session.open_create();
    *session.draft_mut().unwrap() = ProductDraft::new("Q", "3", "");

    let submission = session.begin_submit().unwrap();
    let outcome = controller.execute(submission.command).await;
    assert!(session.finish_submit(submission.ticket, &outcome));

    let modal = session.modal().unwrap();
    assert_eq!(modal.error.as_deref(), Some("bad"));
    assert_eq!(modal.draft.name, "Q");
    assert_eq!(controller.store().len(), 2);
}

#[tokio::test]
async fn test_find_product_by_rendered_id() {
    let (server, controller) = setup().await;
    mount_list(
        &server,
        json!([{ "id": "7", "name": "S", "price": 1, "description": "" }]),
    )
    .await;
    controller.load().await.unwrap();

    let found = controller.find_product("7").unwrap();
    assert_eq!(found.id, ProductId::from("7"));
    assert!(controller.find_product("8").is_none());
}

#[tokio::test]
async fn test_oneshot_connects_runs_and_disconnects() {
    let server = MockServer::start().await;
    mount_list(&server, two_products()).await;
    let config = ControllerConfig {
        url: server.uri().parse().unwrap(),
        ..ControllerConfig::default()
    };

    let (count, controller) = Controller::oneshot(config, |c| async move {
        let n = c.load().await?;
        Ok::<_, CoreError>((n, c))
    })
    .await
    .unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        *controller.connection_state().borrow(),
        ConnectionState::Disconnected
    );
}
