use axum::{Json, extract::State};
use calhub_core::models::meeting::{GenerateMeetingRequest, MeetingLink};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{
        auth::CurrentUser,
        error_handling::{AppError, AppJson, provider_error},
    },
};

/// Creates a meeting directly on Zoom or Teams. Unlike meeting CRUD there is
/// no placeholder: a disconnected platform is a 401.
#[axum::debug_handler]
pub async fn generate_meeting(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    AppJson(payload): AppJson<GenerateMeetingRequest>,
) -> Result<Json<MeetingLink>, AppError> {
    let (platform, request) = payload.into_parts()?;

    let link = state
        .meeting_links
        .generate(user_id, platform, request)
        .await
        .map_err(|err| provider_error(err, platform.display_name()))?;

    tracing::info!("Generated {} meeting for user {}", platform, user_id);
    Ok(Json(link))
}
