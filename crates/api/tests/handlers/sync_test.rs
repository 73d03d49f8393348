use axum::http::StatusCode;
use calhub_core::{
    providers::ProviderError,
    sync::{ProviderEvent, SyncRecord, SyncResponse},
};
use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, user_header};

fn provider_event(id: &str, is_meeting: bool, link: &str) -> ProviderEvent {
    let start = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    ProviderEvent {
        id: id.to_string(),
        title: format!("Entry {}", id),
        description: String::new(),
        start_time: start,
        end_time: start + Duration::minutes(60),
        location: String::new(),
        duration: None,
        is_meeting,
        meeting_link: link.to_string(),
        attendees: Vec::new(),
    }
}

#[tokio::test]
async fn test_outlook_sync_upserts_meetings_and_events() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.outlook.expect_fetch_events().times(1).returning(|_| {
        Ok(vec![
            provider_event("m-1", true, "https://teams.microsoft.com/l/meetup-join/abc"),
            provider_event("e-1", false, ""),
            provider_event("e-2", false, ""),
        ])
    });
    ctx.gmail.expect_fetch_events().never();
    ctx.synced
        .expect_save_synced()
        .withf(move |id, records| {
            let meeting_ok = matches!(
                &records[0],
                SyncRecord::Meeting(meeting)
                    if meeting.platform == "teams"
                        && meeting.source == "outlook"
                        && meeting.source_id.as_deref() == Some("m-1")
                        && meeting.duration == 60
            );
            let events_ok = records[1..].iter().all(|record| {
                matches!(
                    record,
                    SyncRecord::Event(event)
                        if event.source == "outlook" && event.source_id.is_some()
                )
            });
            *id == user_id && records.len() == 3 && meeting_ok && events_ok
        })
        .times(1)
        .returning(|_, records| Ok(records.len()));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.post("/sync/outlook").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<SyncResponse>(),
        SyncResponse {
            message: "Outlook calendar synced successfully".to_string(),
            events_synced: 3,
        }
    );
}

#[tokio::test]
async fn test_gmail_sync_infers_zoom() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.gmail
        .expect_fetch_events()
        .returning(|_| Ok(vec![provider_event("g-1", true, "https://us02web.zoom.us/j/1")]));
    ctx.synced
        .expect_save_synced()
        .withf(|_, records| {
            matches!(
                records.as_slice(),
                [SyncRecord::Meeting(meeting)]
                    if meeting.platform == "zoom" && meeting.source == "gmail"
            )
        })
        .times(1)
        .returning(|_, records| Ok(records.len()));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.post("/sync/gmail").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Gmail calendar synced successfully", "events_synced": 1 })
    );
}

#[tokio::test]
async fn test_entries_without_id_are_skipped() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.gmail
        .expect_fetch_events()
        .returning(|_| Ok(vec![provider_event("", false, "")]));
    ctx.synced
        .expect_save_synced()
        .withf(|_, records| records.is_empty())
        .times(1)
        .returning(|_, _| Ok(0));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.post("/sync/gmail").add_header(name, value).await;

    assert_eq!(response.json::<SyncResponse>().events_synced, 0);
}

#[tokio::test]
async fn test_store_failure_writes_batch_once_and_fails() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.outlook.expect_fetch_events().returning(|_| {
        Ok(vec![
            provider_event("e-1", false, ""),
            provider_event("e-2", false, ""),
        ])
    });
    ctx.synced
        .expect_save_synced()
        .withf(|_, records| records.len() == 2)
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("violates check constraint")));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.post("/sync/outlook").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_unknown_provider() {
    let ctx = TestContext::new();
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.post("/sync/icloud").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_disconnected_provider() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.outlook
        .expect_fetch_events()
        .returning(|_| Err(ProviderError::NotConnected));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.post("/sync/outlook").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "error": "Outlook not connected" }));
}

#[tokio::test]
async fn test_provider_failure_is_bad_gateway() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.gmail
        .expect_fetch_events()
        .returning(|_| Err(ProviderError::Upstream("HTTP 503".to_string())));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.post("/sync/gmail").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert!(response.text().contains("HTTP 503"));
}
