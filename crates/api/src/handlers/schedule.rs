use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use calhub_core::{
    errors::CalError,
    models::{
        MessageResponse,
        schedule::{CreateScheduleRequest, WeeklySchedule},
    },
};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{
        auth::CurrentUser,
        error_handling::{AppError, AppJson},
    },
};

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Response, AppError> {
    let response = match state.schedules.get_schedule(user_id).await? {
        Some(schedule) => Json(schedule).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new("No schedule found")),
        )
            .into_response(),
    };

    Ok(response)
}

/// Creates the caller's schedule (201) or replaces it (200).
#[axum::debug_handler]
pub async fn save_schedule(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    AppJson(payload): AppJson<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<WeeklySchedule>), AppError> {
    let rule = payload.into_rule()?;
    let saved = state.schedules.save_schedule(user_id, rule).await?;

    let status = if saved.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    tracing::info!(
        "Schedule {} for user {}",
        if saved.created { "created" } else { "replaced" },
        user_id
    );
    Ok((status, Json(saved.schedule)))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.schedules.delete_schedule(user_id).await? {
        return Err(AppError(CalError::NotFound("Schedule not found".to_string())));
    }

    Ok(Json(MessageResponse::new("Schedule deleted successfully")))
}
