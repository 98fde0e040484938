//! Data bridge: connects [`Controller`] streams and requests to TUI actions.
//!
//! The long-running bridge subscribes to the product stream and the
//! connection state, forwarding every change as an [`Action`]. Loads and
//! writes run as one-off tasks that report back through the same channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use prodboard_core::{ConnectionState, Controller, Submission};

use crate::action::Action;

/// Connect, load once, then forward changes until cancelled.
pub async fn spawn_data_bridge(
    controller: Controller,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let _ = action_tx.send(Action::Connecting);

    if let Err(e) = controller.connect().await {
        warn!(error = %e, "failed to connect");
        let _ = action_tx.send(Action::Disconnected(e.to_string()));
        return;
    }

    let mut products = controller.products();
    let mut conn_state = controller.connection_state();

    let _ = action_tx.send(Action::Connected);
    let _ = action_tx.send(Action::ProductsUpdated(products.current().clone()));

    let outcome = controller.load().await.map_err(|e| e.to_string());
    let _ = action_tx.send(Action::LoadFinished(outcome));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(snapshot) = products.changed() => {
                debug!(count = snapshot.len(), "dispatching ProductsUpdated");
                let _ = action_tx.send(Action::ProductsUpdated(snapshot));
            }
            Ok(()) = conn_state.changed() => {
                let state = *conn_state.borrow_and_update();
                let action = match state {
                    ConnectionState::Connected => Action::Connected,
                    ConnectionState::Connecting => Action::Connecting,
                    ConnectionState::Disconnected => Action::Disconnected("disconnected".into()),
                    ConnectionState::Failed => Action::Disconnected("connection failed".into()),
                };
                let _ = action_tx.send(action);
            }
        }
    }

    controller.disconnect().await;
    debug!("data bridge shut down");
}

/// Re-fetch the collection in the background.
pub fn spawn_load(controller: &Controller, action_tx: &mpsc::UnboundedSender<Action>) {
    let controller = controller.clone();
    let action_tx = action_tx.clone();
    tokio::spawn(async move {
        let outcome = controller.load().await.map_err(|e| e.to_string());
        let _ = action_tx.send(Action::LoadFinished(outcome));
    });
}

/// Run a modal's command in the background and report its ticket back.
///
/// Nothing cancels the request once sent, even if the modal is closed.
pub fn spawn_submit(
    controller: &Controller,
    action_tx: &mpsc::UnboundedSender<Action>,
    submission: Submission,
) {
    let controller = controller.clone();
    let action_tx = action_tx.clone();
    tokio::spawn(async move {
        let Submission { ticket, command } = submission;
        let verb = command.verb();
        let outcome = controller.execute(command).await;
        let _ = action_tx.send(Action::SubmissionFinished {
            ticket,
            verb,
            outcome: Arc::new(outcome),
        });
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use prodboard_core::{Command, ControllerConfig, ProductDraft};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config_for(server: &MockServer) -> ControllerConfig {
        ControllerConfig {
            url: server.uri().parse().unwrap(),
            ..ControllerConfig::default()
        }
    }

    async fn next_action(rx: &mut mpsc::UnboundedReceiver<Action>) -> Action {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn bridge_connects_loads_and_forwards_snapshots() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "id": 1, "name": "Desk", "price": 250, "description": "" },
                    { "id": 2, "name": "Lamp", "price": 30, "description": "" }
                ]
            })))
            .mount(&server)
            .await;

        let controller = Controller::new(config_for(&server));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let bridge = tokio::spawn(spawn_data_bridge(controller, tx, cancel.clone()));

        assert!(matches!(next_action(&mut rx).await, Action::Connecting));
        assert!(matches!(next_action(&mut rx).await, Action::Connected));
        assert!(matches!(
            next_action(&mut rx).await,
            Action::ProductsUpdated(items) if items.is_empty()
        ));
        assert!(matches!(
            next_action(&mut rx).await,
            Action::LoadFinished(Ok(2))
        ));
        assert!(matches!(
            next_action(&mut rx).await,
            Action::ProductsUpdated(items) if items.len() == 2
        ));

        cancel.cancel();
        bridge.await.unwrap();
    }

    #[tokio::test]
    async fn failed_load_is_reported_as_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "message": "db offline" })),
            )
            .mount(&server)
            .await;

        let controller = Controller::new(config_for(&server));
        controller.connect().await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_load(&controller, &tx);

        match next_action(&mut rx).await {
            Action::LoadFinished(Err(message)) => assert_eq!(message, "db offline"),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn submission_reports_its_ticket() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": { "id": 9, "name": "Shelf", "price": 12, "description": "pine" }
            })))
            .mount(&server)
            .await;

        let controller = Controller::new(config_for(&server));
        controller.connect().await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_submit(
            &controller,
            &tx,
            Submission {
                ticket: 4,
                command: Command::Create {
                    draft: ProductDraft::new("Shelf", "12", "pine"),
                },
            },
        );

        match next_action(&mut rx).await {
            Action::SubmissionFinished {
                ticket,
                verb,
                outcome,
            } => {
                assert_eq!(ticket, 4);
                assert_eq!(verb, "create");
                assert!(outcome.is_ok());
            }
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(controller.products_snapshot().len(), 1);
    }
}
