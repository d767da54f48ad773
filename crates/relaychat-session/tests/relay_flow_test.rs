//! End-to-end turns through the real completion client against a mock relay.

use std::sync::Arc;
use std::time::Duration;

use mockito::Matcher;
use relaychat_llm::{CompletionClient, TransportSettings};
use relaychat_persist::{KeyValueStore, MemoryStore, SessionStore, HISTORY_KEY};
use relaychat_session::{ChatEvent, SessionConfig, SessionController, Turn, TurnOutcome};
use serde_json::json;
use tokio::sync::mpsc;

fn controller(
    settings: &TransportSettings,
    durable: Arc<MemoryStore>,
) -> (SessionController, mpsc::UnboundedReceiver<ChatEvent>) {
    let (tx, rx) = mpsc::unbounded_channel::<ChatEvent>();
    let controller = SessionController::builder()
        .client(Arc::new(CompletionClient::new(settings).unwrap()))
        .store(SessionStore::new(durable))
        .sink(Arc::new(tx))
        .config(
            SessionConfig::new()
                .with_greeting("Hello! How can I help?")
                .with_persona_template("You are a test assistant.<user_context>"),
        )
        .build()
        .unwrap();
    (controller, rx)
}

async fn stored_turns(durable: &MemoryStore) -> Vec<Turn> {
    let raw = durable.get(HISTORY_KEY).await.unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_turn_through_reachable_relay() {
    let mut server = mockito::Server::new_async().await;
    let _probe = server.mock("OPTIONS", "/").create_async().await;
    let completion = server
        .mock("POST", "/")
        .match_body(Matcher::Json(json!({
            "messages": [
                {"role": "system", "content": "You are a test assistant."},
                {"role": "assistant", "content": "Hello! How can I help?"},
                {"role": "user", "content": "hi"}
            ]
        })))
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"content":"Hello!"}}]}"#)
        .create_async()
        .await;

    let durable = Arc::new(MemoryStore::new());
    let settings = TransportSettings::new().with_relay_url(server.url());
    let (controller, _rx) = controller(&settings, durable.clone());

    controller.initialize().await.unwrap();
    let outcome = controller.submit("hi").await.unwrap();

    assert!(matches!(outcome, TurnOutcome::Settled { degraded: false, .. }));
    assert_eq!(
        stored_turns(&durable).await,
        vec![
            Turn::assistant("Hello! How can I help?"),
            Turn::user("hi"),
            Turn::assistant("Hello!")
        ]
    );
    completion.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_relay_reports_configuration_notice() {
    let durable = Arc::new(MemoryStore::new());
    let settings = TransportSettings::new()
        .with_relay_url("http://127.0.0.1:1")
        .with_probe_timeout(Duration::from_millis(500));
    let (controller, mut rx) = controller(&settings, durable.clone());

    controller.initialize().await.unwrap();
    let outcome = controller.submit("hi").await.unwrap();

    assert!(matches!(outcome, TurnOutcome::Failed { .. }));
    assert_eq!(
        stored_turns(&durable).await,
        vec![Turn::assistant("Hello! How can I help?"), Turn::user("hi")]
    );

    let mut notices = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let ChatEvent::Notice { message } = event {
            notices.push(message);
        }
    }
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("http://127.0.0.1:1"));
}

#[tokio::test]
async fn test_relay_error_status_keeps_user_turn() {
    let mut server = mockito::Server::new_async().await;
    let _probe = server.mock("OPTIONS", "/").create_async().await;
    let _completion = server
        .mock("POST", "/")
        .with_status(502)
        .with_body(r#"{"error":"Error contacting OpenAI","details":"boom"}"#)
        .create_async()
        .await;

    let durable = Arc::new(MemoryStore::new());
    let settings = TransportSettings::new().with_relay_url(server.url());
    let (controller, _rx) = controller(&settings, durable.clone());

    controller.initialize().await.unwrap();
    controller.submit("hi").await.unwrap();

    let turns = stored_turns(&durable).await;
    assert_eq!(turns.len(), 2);
    assert_eq!(turns.last(), Some(&Turn::user("hi")));
}
