use axum::http::StatusCode;
use calhub_core::models::time_slot::AvailableSlotsResponse;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, sample_rule, sample_schedule, user_header};

fn context_with_rule(rule: calhub_core::models::schedule::ScheduleRule) -> TestContext {
    let mut ctx = TestContext::new();
    let schedule = sample_schedule(ctx.user_id, rule);
    ctx.schedules
        .expect_get_schedule()
        .returning(move |_| Ok(Some(schedule.clone())));
    ctx
}

#[tokio::test]
async fn test_slots_for_working_day() {
    let ctx = context_with_rule(sample_rule());
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .get("/schedule/available-slots")
        .add_header(name, value)
        .add_query_param("date", "2024-03-04")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "slots": [
                { "start": "09:00:00", "end": "09:30:00" },
                { "start": "09:30:00", "end": "10:00:00" }
            ]
        })
    );
}

#[rstest]
#[case("2024-04-01", "Date is outside of scheduled range")]
#[case("2024-02-29", "Date is outside of scheduled range")]
#[case("2024-03-03", "Not a working day")]
#[tokio::test]
async fn test_empty_for_reason(#[case] day: &str, #[case] message: &str) {
    let ctx = context_with_rule(sample_rule());
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .get("/schedule/available-slots")
        .add_header(name, value)
        .add_query_param("date", day)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<AvailableSlotsResponse>();
    assert!(body.slots.is_empty());
    assert_eq!(body.message.as_deref(), Some(message));
}

#[tokio::test]
async fn test_full_datetime_uses_date_part() {
    let ctx = context_with_rule(sample_rule());
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .get("/schedule/available-slots")
        .add_header(name, value)
        .add_query_param("date", "2024-03-31T08:00:00Z")
        .await;

    // March 31st 2024 is a Sunday
    let body = response.json::<AvailableSlotsResponse>();
    assert_eq!(body.message.as_deref(), Some("Not a working day"));
}

#[tokio::test]
async fn test_missing_date_parameter() {
    let mut ctx = TestContext::new();
    ctx.schedules.expect_get_schedule().never();
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .get("/schedule/available-slots")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Date parameter is required"));
}

#[tokio::test]
async fn test_unparseable_date_parameter() {
    let mut ctx = TestContext::new();
    ctx.schedules.expect_get_schedule().never();
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .get("/schedule/available-slots")
        .add_header(name, value)
        .add_query_param("date", "next tuesday")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_schedule() {
    let mut ctx = TestContext::new();
    ctx.schedules.expect_get_schedule().returning(|_| Ok(None));
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .get("/schedule/available-slots")
        .add_header(name, value)
        .add_query_param("date", "2024-03-04")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains("No schedule found"));
}

#[test_log::test(tokio::test)]
async fn test_invalid_stored_schedule_is_unprocessable() {
    let mut rule = sample_rule();
    rule.slot_duration = 0;
    let ctx = context_with_rule(rule);
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .get("/schedule/available-slots")
        .add_header(name, value)
        .add_query_param("date", "2024-03-04")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("Invalid schedule"));
}
