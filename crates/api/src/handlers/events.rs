use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use calhub_core::{
    errors::CalError,
    models::{
        ListQuery, MessageResponse,
        event::{CreateEventRequest, Event, UpdateEventRequest},
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
    AppError(CalError::NotFound("Event not found".to_string()))
}

#[axum::debug_handler]
pub async fn list_events(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    let filter = query.into_filter()?;
    let events = state.events.list_events(user_id, filter).await?;
    Ok(Json(events))
}

#[axum::debug_handler]
pub async fn get_event(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    let event = state.events.get_event(user_id, id).await?.ok_or_else(not_found)?;
    Ok(Json(event))
}

#[axum::debug_handler]
pub async fn create_event(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    AppJson(payload): AppJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let new_event = payload.into_new_event()?;
    let event = state.events.create_event(user_id, new_event).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[axum::debug_handler]
pub async fn update_event(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateEventRequest>,
) -> Result<Json<Event>, AppError> {
    let patch = payload.into_patch()?;
    let event = state
        .events
        .update_event(user_id, id, patch)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(event))
}

#[axum::debug_handler]
pub async fn delete_event(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.events.delete_event(user_id, id).await? {
        return Err(not_found());
    }
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}
