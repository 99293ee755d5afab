//! Integration tests for the stub control surface

use twitter_bot_api::models::BotState;
use twitter_bot_api::{BotService, ControlSurface};

#[tokio::test]
async fn start_and_stop_log_and_return_fixed_status() {
    let temp = tempfile::tempdir().expect("tempdir");
    let service = BotService::open(temp.path());

    let started = service.control().start().await;
    let stopped = service.control().stop().await;

    assert_eq!(started.status, BotState::Running);
    assert_eq!(started.message, "Bot started successfully");
    assert_eq!(stopped.status, BotState::Stopped);
    assert_eq!(stopped.message, "Bot stopped successfully");

    let logs = service.logs().list().await;
    assert_eq!(
        logs.iter().map(|e| (e.id.as_str(), e.message.as_str())).collect::<Vec<_>>(),
        [("1", "Bot started"), ("2", "Bot stopped")]
    );
}

#[tokio::test]
async fn status_is_fixed_and_records_nothing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let service = BotService::open(temp.path());
    service.control().stop().await;

    let status = service.control().status().await;

    assert_eq!(status.status, BotState::Running);
    assert_eq!(status.last_check, "5 minutes ago");
    assert_eq!(status.next_check, "in 5 minutes");
    assert_eq!(service.logs().list().await.len(), 1);

    let value = serde_json::to_value(&status).expect("serialize");
    assert_eq!(value["lastCheck"], "5 minutes ago");
    assert_eq!(value["status"], "running");
}
