use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use calhub_core::{
    errors::CalError,
    models::{
        ListQuery, MessageResponse,
        meeting::{CreateMeetingRequest, Meeting, MeetingLinkRequest, UpdateMeetingRequest},
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        auth::CurrentUser,
        error_handling::{AppError, AppJson},
    },
};

fn not_found() -> AppError {
    AppError(CalError::NotFound("Meeting not found".to_string()))
}

#[axum::debug_handler]
pub async fn list_meetings(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Meeting>>, AppError> {
    let filter = query.into_filter()?;
    let meetings = state.meetings.list_meetings(user_id, filter).await?;
    Ok(Json(meetings))
}

#[axum::debug_handler]
pub async fn get_meeting(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Meeting>, AppError> {
    let meeting = state
        .meetings
        .get_meeting(user_id, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(meeting))
}

#[axum::debug_handler]
pub async fn create_meeting(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    AppJson(payload): AppJson<CreateMeetingRequest>,
) -> Result<(StatusCode, Json<Meeting>), AppError> {
    let mut new_meeting = payload.into_new_meeting()?;

    let request = MeetingLinkRequest {
        title: new_meeting.title.clone(),
        start: new_meeting.date,
        duration: new_meeting.duration,
        description: new_meeting.description.clone(),
    };
    new_meeting.meeting_link = state
        .meeting_links
        .link_for(user_id, &new_meeting.platform, request)
        .await;

    let meeting = state.meetings.create_meeting(user_id, new_meeting).await?;
    Ok((StatusCode::CREATED, Json(meeting)))
}

/// Applies the supplied fields. A platform change issues a new link for the
/// meeting as it will look after the update.
#[axum::debug_handler]
pub async fn update_meeting(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateMeetingRequest>,
) -> Result<Json<Meeting>, AppError> {
    let mut patch = payload.into_patch()?;

    let current = state
        .meetings
        .get_meeting(user_id, id)
        .await?
        .ok_or_else(not_found)?;

    if let Some(platform) = patch.platform.clone().filter(|p| *p != current.platform) {
        let request = MeetingLinkRequest {
            title: patch.title.clone().unwrap_or(current.title),
            start: patch.date.unwrap_or(current.date),
            duration: patch.duration.unwrap_or(current.duration),
            description: patch.description.clone().unwrap_or(current.description),
        };
        patch.meeting_link = Some(state.meeting_links.link_for(user_id, &platform, request).await);
    }

    let meeting = state
        .meetings
        .update_meeting(user_id, id, patch)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(meeting))
}

#[axum::debug_handler]
pub async fn delete_meeting(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.meetings.delete_meeting(user_id, id).await? {
        return Err(not_found());
    }
    Ok(Json(MessageResponse::new("Meeting deleted successfully")))
}
