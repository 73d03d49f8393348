use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use calhub_core::{
    errors::CalError,
    models::{
        ListQuery, MessageResponse,
        task::{CreateTaskRequest, Task, UpdateTaskRequest},
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
    AppError(CalError::NotFound("Task not found".to_string()))
}

#[axum::debug_handler]
pub async fn list_tasks(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Task>>, AppError> {
    let filter = query.into_filter()?;
    let tasks = state.tasks.list_tasks(user_id, filter).await?;
    Ok(Json(tasks))
}

#[axum::debug_handler]
pub async fn get_task(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, AppError> {
    let task = state.tasks.get_task(user_id, id).await?.ok_or_else(not_found)?;
    Ok(Json(task))
}

#[axum::debug_handler]
pub async fn create_task(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    AppJson(payload): AppJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let new_task = payload.into_new_task()?;
    let task = state.tasks.create_task(user_id, new_task).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[axum::debug_handler]
pub async fn update_task(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let patch = payload.into_patch()?;
    let task = state
        .tasks
        .update_task(user_id, id, patch)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(task))
}

#[axum::debug_handler]
pub async fn delete_task(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.tasks.delete_task(user_id, id).await? {
        return Err(not_found());
    }
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
