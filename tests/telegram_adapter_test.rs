//! Telegram adapter tests against a mock Bot API server
//! Run with: cargo test --test telegram_adapter_test

use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc;
use weather_bot::application::errors::BotError;
use weather_bot::domain::entities::Content;
use weather_bot::domain::traits::Bot;
use weather_bot::infrastructure::adapters::telegram::TelegramAdapter;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123:TEST";

fn adapter_for(server: &MockServer) -> TelegramAdapter {
    TelegramAdapter::with_api_base(TOKEN, server.uri()).unwrap()
}

fn updates_json() -> serde_json::Value {
    json!({
        "ok": true,
        "result": [
            {"update_id": 100, "message": {"message_id": 1, "chat": {"id": 42, "type": "private"}, "text": "/start"}},
            {"update_id": 101, "message": {"message_id": 2, "chat": {"id": 42, "type": "private"}, "text": "Paris"}},
            {"update_id": 102, "edited_message": {"message_id": 2, "chat": {"id": 42}, "text": "Lyon"}}
        ]
    })
}

#[tokio::test]
async fn test_fetch_bot_info() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getMe", TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"id": 777, "is_bot": true, "first_name": "Weather", "username": "weather_test_bot"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut bot = adapter_for(&server);
    bot.fetch_bot_info().await.unwrap();

    let info = bot.bot_info();
    assert_eq!(info.id, "777");
    assert_eq!(info.username, "weather_test_bot");
}

/// An invalid token surfaces the API description
#[tokio::test]
async fn test_fetch_bot_info_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "ok": false, "error_code": 401, "description": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let mut bot = adapter_for(&server);
    match bot.fetch_bot_info().await {
        Err(BotError::Api(msg)) => assert_eq!(msg, "Unauthorized"),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_send_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .and(body_partial_json(json!({"chat_id": "42", "text": "Совет: Wear a light jacket."})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"message_id": 55, "chat": {"id": 42}, "date": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = adapter_for(&server)
        .send_message("42", "Совет: Wear a light jacket.")
        .await
        .unwrap();
    assert_eq!(id, "55");
}

#[tokio::test]
async fn test_get_updates_keeps_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .and(body_partial_json(json!({"offset": 100, "timeout": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(updates_json()))
        .mount(&server)
        .await;

    let updates = adapter_for(&server).get_updates(100, 0).await.unwrap();
    assert_eq!(updates.len(), 3);
    assert_eq!(updates[1].message.as_ref().unwrap().text.as_deref(), Some("Paris"));
    assert!(updates[2].message.is_none());
    assert_eq!(TelegramAdapter::get_next_offset(&updates, 100), 103);
}

/// Polling forwards parsed messages and stops once the receiver is gone
#[tokio::test]
async fn test_poll_updates_forwards_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{}/getUpdates", TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(updates_json()))
        .mount(&server)
        .await;

    let bot = adapter_for(&server);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let poll = async move { bot.poll_updates(tx).await };
    let receive = async move {
        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        (first, second)
    };

    let (first, second) = tokio::time::timeout(Duration::from_secs(5), async {
        let handle = tokio::spawn(poll);
        let received = receive.await;
        handle.await.unwrap();
        received
    })
    .await
    .expect("polling did not stop after the receiver was dropped");

    assert_eq!(first.chat_id, "42");
    assert_eq!(
        first.content,
        Content::Command { name: "start".to_string(), args: vec![] }
    );
    assert_eq!(second.content, Content::Text("Paris".to_string()));
}

/// Network failures must not expose the token embedded in the method URL
#[tokio::test]
async fn test_network_error_hides_token() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let bot = TelegramAdapter::with_api_base(TOKEN, format!("http://127.0.0.1:{}", port)).unwrap();
    let err = bot.get_updates(0, 0).await.unwrap_err();
    assert!(matches!(err, BotError::Network(_)), "{:?}", err);

    let text = err.to_string();
    assert!(!text.contains(TOKEN), "{}", text);
    assert!(!text.contains("getUpdates"), "{}", text);

    let err = bot.send_message("42", "hi").await.unwrap_err();
    assert!(!err.to_string().contains(TOKEN), "{}", err);
}

/// A non-JSON reply is a parse error that still leaves the token out
#[tokio::test]
async fn test_parse_error_hides_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = adapter_for(&server).get_updates(0, 0).await.unwrap_err();
    assert!(matches!(err, BotError::Parse(_)), "{:?}", err);
    assert!(err.to_string().contains("502"), "{}", err);
    assert!(!err.to_string().contains(TOKEN), "{}", err);
}
