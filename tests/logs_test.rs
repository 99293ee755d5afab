//! Integration tests for the activity log

use chrono::NaiveDateTime;
use proptest::prelude::*;

use twitter_bot_api::models::LOG_TIMESTAMP_FORMAT;
use twitter_bot_api::{BotService, DocumentStore, LogLevel, LogRecorder};
use std::sync::Arc;

fn recorder() -> (tempfile::TempDir, LogRecorder) {
    let temp = tempfile::tempdir().expect("tempdir");
    let recorder = LogRecorder::new(Arc::new(DocumentStore::open(temp.path())));
    (temp, recorder)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
}

#[tokio::test]
async fn entries_carry_second_precision_local_timestamps() {
    let (_temp, recorder) = recorder();

    let entry = recorder
        .record(LogLevel::Warning, "rate limit close", Some("48/50".to_string()))
        .await
        .expect("record");

    assert!(NaiveDateTime::parse_from_str(&entry.timestamp, LOG_TIMESTAMP_FORMAT).is_ok());
    assert_eq!(entry.timestamp.len(), "2025-01-01 00:00:00".len());
    assert_eq!(entry.level, "warning");
    assert_eq!(entry.details.as_deref(), Some("48/50"));
}

#[tokio::test]
async fn list_by_level_filters_and_all_disables_filter() {
    let (_temp, recorder) = recorder();
    recorder.record(LogLevel::Info, "a", None).await.expect("record");
    recorder.record(LogLevel::Error, "b", None).await.expect("record");
    recorder.record(LogLevel::Info, "c", None).await.expect("record");

    let infos = recorder.list_by_level("info").await;
    assert_eq!(
        infos.iter().map(|e| e.message.as_str()).collect::<Vec<_>>(),
        ["a", "c"]
    );
    assert_eq!(recorder.list_by_level("all").await.len(), 3);
}

#[tokio::test]
async fn export_text_renders_one_line_per_entry() {
    let (_temp, recorder) = recorder();
    let first = recorder.record(LogLevel::Info, "Bot started", None).await.expect("record");
    let second = recorder
        .record(LogLevel::Error, "Reply failed", Some("HTTP 429".to_string()))
        .await
        .expect("record");

    let text = recorder.export_text().await;

    assert_eq!(
        text,
        format!(
            "[{}] [INFO] Bot started\n[{}] [ERROR] Reply failed - HTTP 429",
            first.timestamp, second.timestamp
        )
    );
}

#[tokio::test]
async fn numbering_continues_after_existing_entries() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        temp.path().join("logs.json"),
        r#"[{"id":"1","timestamp":"2025-01-01 00:00:00","level":"info","message":"old","details":null}]"#,
    )
    .expect("seed");
    let recorder = LogRecorder::new(Arc::new(DocumentStore::open(temp.path())));

    let entry = recorder.record(LogLevel::Info, "new", None).await.expect("record");

    assert_eq!(entry.id, "2");
    assert_eq!(recorder.list().await.len(), 2);
}

#[tokio::test]
async fn startup_records_server_started_entry() {
    let temp = tempfile::tempdir().expect("tempdir");
    let service = BotService::open(temp.path());

    let entry = service.startup().await.expect("startup");

    assert_eq!(entry.id, "1");
    assert_eq!(entry.message, "API server started");
    assert_eq!(
        entry.details.as_deref(),
        Some("Twitter automatic interaction bot API server started")
    );
    for file in ["accounts.json", "responses.json", "logs.json", "settings.json"] {
        assert!(temp.path().join(file).exists(), "{file} should exist");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn n_records_yield_ids_one_through_n(n in 1usize..25) {
        let (_temp, recorder) = recorder();
        let ids = runtime().block_on(async {
            for i in 0..n {
                recorder
                    .record(LogLevel::Info, format!("event {i}"), None)
                    .await
                    .expect("record");
            }
            recorder
                .list()
                .await
                .into_iter()
                .map(|entry| entry.id)
                .collect::<Vec<_>>()
        });

        let expected: Vec<String> = (1..=n).map(|i| i.to_string()).collect();
        prop_assert_eq!(ids, expected);
    }
}
