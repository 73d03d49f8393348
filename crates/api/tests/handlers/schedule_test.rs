use axum::http::{HeaderName, HeaderValue, StatusCode};
use calhub_core::models::schedule::{WeeklySchedule, WorkingDays};
use calhub_db::stores::SavedSchedule;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, date, sample_rule, sample_schedule, time, user_header};

#[tokio::test]
async fn test_get_schedule_not_found() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.schedules
        .expect_get_schedule()
        .withf(move |id| *id == user_id)
        .times(1)
        .returning(|_| Ok(None));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.get("/schedule").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({ "message": "No schedule found" }));
}

#[tokio::test]
async fn test_get_schedule_shape() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    let stored = sample_schedule(user_id, sample_rule());
    let returned = stored.clone();
    ctx.schedules
        .expect_get_schedule()
        .returning(move |_| Ok(Some(returned.clone())));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.get("/schedule").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["start_date"], "2024-03-01");
    assert_eq!(body["start_time"], "09:00:00");
    assert_eq!(body["slot_duration"], 30);
    assert_eq!(body["working_days"]["monday"], true);
    assert_eq!(body["working_days"]["sunday"], false);
    assert_eq!(response.json::<WeeklySchedule>(), stored);
}

#[tokio::test]
async fn test_create_schedule_returns_created() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.schedules
        .expect_save_schedule()
        .withf(|_, rule| {
            rule.start_date == date(2024, 3, 1)
                && rule.end_time == time(17, 0)
                && rule.slot_duration == 30
                && rule.working_days == WorkingDays::default()
        })
        .times(1)
        .returning(|user_id, rule| {
            Ok(SavedSchedule {
                schedule: sample_schedule(user_id, rule),
                created: true,
            })
        });

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .post("/schedule")
        .add_header(name, value)
        .json(&json!({
            "start_date": "2024-03-01",
            "end_date": "2024-03-31",
            "start_time": "09:00",
            "end_time": "17:00"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<WeeklySchedule>().user_id, user_id);
}

#[tokio::test]
async fn test_replace_schedule_returns_ok() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.schedules
        .expect_save_schedule()
        .withf(|_, rule| rule.slot_duration == 15 && rule.working_days.saturday)
        .returning(|user_id, rule| {
            Ok(SavedSchedule {
                schedule: sample_schedule(user_id, rule),
                created: false,
            })
        });

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .post("/schedule")
        .add_header(name, value)
        .json(&json!({
            "start_date": "2024-03-01",
            "end_date": "2024-03-31",
            "start_time": "09:00:00",
            "end_time": "12:00:00",
            "slot_duration": 15,
            "working_days": { "saturday": true }
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let schedule = response.json::<WeeklySchedule>();
    assert!(schedule.rule.working_days.monday);
    assert!(schedule.rule.working_days.saturday);
}

#[tokio::test]
async fn test_create_schedule_missing_fields() {
    let mut ctx = TestContext::new();
    ctx.schedules.expect_save_schedule().never();
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .post("/schedule")
        .add_header(name, value)
        .json(&json!({ "start_date": "2024-03-01", "end_date": "2024-03-31" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Start date, end date, start time, and end time are required")
    );
}

#[tokio::test]
async fn test_create_schedule_rejects_non_positive_duration() {
    let mut ctx = TestContext::new();
    ctx.schedules.expect_save_schedule().never();
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .post("/schedule")
        .add_header(name, value)
        .json(&json!({
            "start_date": "2024-03-01",
            "end_date": "2024-03-31",
            "start_time": "09:00",
            "end_time": "17:00",
            "slot_duration": 0
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_schedule_rejects_unparseable_time() {
    let ctx = TestContext::new();
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .post("/schedule")
        .add_header(name, value)
        .json(&json!({
            "start_date": "2024-03-01",
            "end_date": "2024-03-31",
            "start_time": "nine",
            "end_time": "17:00"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.text().contains("start_time"));
}

#[tokio::test]
async fn test_create_schedule_rejects_mistyped_field_as_json_error() {
    let mut ctx = TestContext::new();
    ctx.schedules.expect_save_schedule().never();
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .post("/schedule")
        .add_header(name, value)
        .json(&json!({
            "start_date": "2024-03-01",
            "end_date": "2024-03-31",
            "start_time": "09:00",
            "end_time": "17:00",
            "slot_duration": "30"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("slot_duration"));
}

#[tokio::test]
async fn test_create_schedule_rejects_non_json_body() {
    let mut ctx = TestContext::new();
    ctx.schedules.expect_save_schedule().never();
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .post("/schedule")
        .add_header(name, value)
        .text("start_date=2024-03-01")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_delete_schedule() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.schedules
        .expect_delete_schedule()
        .times(1)
        .returning(|_| Ok(true));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.delete("/schedule").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Schedule deleted successfully" })
    );
}

#[tokio::test]
async fn test_delete_missing_schedule() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.schedules
        .expect_delete_schedule()
        .returning(|_| Ok(false));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.delete("/schedule").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains("Schedule not found"));
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.schedules
        .expect_get_schedule()
        .returning(|_| Err(eyre::eyre!("connection refused")));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server.get("/schedule").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_missing_user_header_is_unauthorized() {
    let mut ctx = TestContext::new();
    ctx.schedules.expect_get_schedule().never();

    let server = ctx.server();
    let response = server.get("/schedule").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(response.text().contains("Missing X-User-Id header"));
}

#[tokio::test]
async fn test_malformed_user_header_is_unauthorized() {
    let ctx = TestContext::new();

    let server = ctx.server();
    let response = server
        .get("/schedule")
        .add_header(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_static("not-a-uuid"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(response.text().contains("Invalid X-User-Id header"));
}
