//! Integration tests for the settings document

use twitter_bot_api::{BotService, Settings};

fn custom_settings() -> Settings {
    Settings {
        check_interval: 15,
        max_likes_per_day: 120,
        max_replies_per_day: 40,
        enable_notifications: false,
        notification_email: None,
        pause_overnight: true,
        pause_start: Some("23:30".to_string()),
        pause_end: Some("06:00".to_string()),
        twitter_api_key: "key".to_string(),
        twitter_api_secret: "secret".to_string(),
        twitter_access_token: "token".to_string(),
        twitter_access_token_secret: "token-secret".to_string(),
    }
}

#[tokio::test]
async fn settings_exist_after_initialization() {
    let temp = tempfile::tempdir().expect("tempdir");
    let service = BotService::open(temp.path());
    service.initialize().await.expect("initialize");

    assert_eq!(service.settings().get().await, Settings::default());
}

#[tokio::test]
async fn replace_then_get_returns_replacement() {
    let temp = tempfile::tempdir().expect("tempdir");
    let service = BotService::open(temp.path());
    service.initialize().await.expect("initialize");

    let replaced = service
        .settings()
        .replace(custom_settings())
        .await
        .expect("replace");

    assert_eq!(replaced, custom_settings());
    assert_eq!(service.settings().get().await, custom_settings());

    let logs = service.logs().list().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].message, "Settings updated");
}

#[tokio::test]
async fn replace_does_not_merge_old_fields() {
    let temp = tempfile::tempdir().expect("tempdir");
    let service = BotService::open(temp.path());
    service
        .settings()
        .replace(Settings {
            notification_email: Some("ops@example.com".to_string()),
            ..Settings::default()
        })
        .await
        .expect("replace");

    service
        .settings()
        .replace(custom_settings())
        .await
        .expect("replace");

    let stored = service.settings().get().await;
    assert_eq!(stored.notification_email, None);

    let raw = std::fs::read_to_string(temp.path().join("settings.json")).expect("read");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("parse");
    assert!(value["notificationEmail"].is_null());
    assert_eq!(value["checkInterval"], 15);
}
