use axum::http::StatusCode;
use calhub_core::{
    models::meeting::{ConferencingPlatform, Meeting, MeetingLink},
    providers::ProviderError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{TestContext, sample_meeting, user_header};

fn echo_created(ctx: &mut TestContext) {
    ctx.meetings
        .expect_create_meeting()
        .times(1)
        .returning(|user_id, new_meeting| {
            let mut meeting = sample_meeting(user_id, &new_meeting.platform);
            meeting.title = new_meeting.title;
            meeting.meeting_link = new_meeting.meeting_link;
            meeting.duration = new_meeting.duration;
            Ok(meeting)
        });
}

#[tokio::test]
async fn test_create_meeting_uses_platform_link() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.conferencing
        .expect_create_meeting()
        .withf(|_, platform, request| {
            *platform == ConferencingPlatform::Zoom && request.duration == 45
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(MeetingLink {
                meeting_link: "https://zoom.us/j/987".to_string(),
                meeting_id: "987".to_string(),
                password: Some("secret".to_string()),
            })
        });
    echo_created(&mut ctx);

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .post("/meetings")
        .add_header(name, value)
        .json(&json!({
            "title": "Planning",
            "date": "2024-03-04T15:00:00Z",
            "duration": 45,
            "platform": "zoom"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Meeting>().meeting_link, "https://zoom.us/j/987");
}

#[tokio::test]
async fn test_create_meeting_falls_back_to_placeholder() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.conferencing
        .expect_create_meeting()
        .returning(|_, _, _| Err(ProviderError::NotConnected));
    echo_created(&mut ctx);

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .post("/meetings")
        .add_header(name, value)
        .json(&json!({
            "title": "Planning",
            "date": "2024-03-04T15:00:00Z",
            "duration": 30,
            "platform": "teams"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert!(
        response
            .json::<Meeting>()
            .meeting_link
            .starts_with("https://teams.microsoft.com/l/meetup-join/")
    );
}

#[tokio::test]
async fn test_create_meeting_on_other_platform_has_no_link() {
    let mut ctx = TestContext::new();
    ctx.conferencing.expect_create_meeting().never();
    echo_created(&mut ctx);
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .post("/meetings")
        .add_header(name, value)
        .json(&json!({
            "title": "Coffee",
            "date": "2024-03-04T15:00:00Z",
            "duration": 15,
            "platform": "in-person"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Meeting>().meeting_link, "#");
}

#[tokio::test]
async fn test_create_meeting_requires_positive_duration() {
    let mut ctx = TestContext::new();
    ctx.meetings.expect_create_meeting().never();
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .post("/meetings")
        .add_header(name, value)
        .json(&json!({
            "title": "Coffee",
            "date": "2024-03-04T15:00:00Z",
            "duration": 0,
            "platform": "zoom"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(
        response
            .text()
            .contains("Title, date, duration, and platform are required")
    );
}

#[tokio::test]
async fn test_list_meetings_filters_by_platform() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    ctx.meetings
        .expect_list_meetings()
        .withf(|_, filter| filter.platform.as_deref() == Some("teams") && filter.source.is_none())
        .returning(move |user_id, _| Ok(vec![sample_meeting(user_id, "teams")]));

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .get("/meetings")
        .add_header(name, value)
        .add_query_param("platform", "teams")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Vec<Meeting>>()[0].platform, "teams");
}

#[tokio::test]
async fn test_platform_change_regenerates_link() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    let current = sample_meeting(user_id, "zoom");
    let meeting_id = current.id;
    let stored = current.clone();
    ctx.meetings
        .expect_get_meeting()
        .returning(move |_, _| Ok(Some(stored.clone())));
    ctx.conferencing
        .expect_create_meeting()
        .withf(|_, platform, request| {
            *platform == ConferencingPlatform::Teams
                && request.title == "Planning v2"
                && request.duration == 45
        })
        .times(1)
        .returning(|_, _, _| Err(ProviderError::NotConnected));
    ctx.meetings
        .expect_update_meeting()
        .withf(|_, _, patch| {
            patch.platform.as_deref() == Some("teams")
                && patch
                    .meeting_link
                    .as_deref()
                    .is_some_and(|link| link.starts_with("https://teams.microsoft.com/"))
        })
        .times(1)
        .returning(move |_, _, patch| {
            let mut meeting = current.clone();
            patch.apply(&mut meeting);
            Ok(Some(meeting))
        });

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .put(&format!("/meetings/{}", meeting_id))
        .add_header(name, value)
        .json(&json!({ "platform": "teams", "title": "Planning v2" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let meeting = response.json::<Meeting>();
    assert_eq!(meeting.platform, "teams");
    assert_eq!(meeting.title, "Planning v2");
}

#[tokio::test]
async fn test_same_platform_keeps_link() {
    let mut ctx = TestContext::new();
    let user_id = ctx.user_id;
    let current = sample_meeting(user_id, "zoom");
    let meeting_id = current.id;
    let stored = current.clone();
    ctx.meetings
        .expect_get_meeting()
        .returning(move |_, _| Ok(Some(stored.clone())));
    ctx.conferencing.expect_create_meeting().never();
    ctx.meetings
        .expect_update_meeting()
        .withf(|_, _, patch| patch.meeting_link.is_none() && patch.duration == Some(60))
        .returning(move |_, _, patch| {
            let mut meeting = current.clone();
            patch.apply(&mut meeting);
            Ok(Some(meeting))
        });

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .put(&format!("/meetings/{}", meeting_id))
        .add_header(name, value)
        .json(&json!({ "platform": "zoom", "duration": 60 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Meeting>().meeting_link, "https://zoom.us/j/1");
}

#[tokio::test]
async fn test_update_missing_meeting() {
    let mut ctx = TestContext::new();
    ctx.meetings.expect_get_meeting().returning(|_, _| Ok(None));
    ctx.meetings.expect_update_meeting().never();
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .put(&format!("/meetings/{}", Uuid::new_v4()))
        .add_header(name, value)
        .json(&json!({ "title": "Gone" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains("Meeting not found"));
}

#[tokio::test]
async fn test_delete_meeting() {
    let mut ctx = TestContext::new();
    ctx.meetings.expect_delete_meeting().returning(|_, _| Ok(true));
    let user_id = ctx.user_id;

    let server = ctx.server();
    let (name, value) = user_header(user_id);
    let response = server
        .delete(&format!("/meetings/{}", Uuid::new_v4()))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Meeting deleted successfully"));
}
