use axum::{
    Json,
    extract::{Path, State},
};
use calhub_core::sync::SyncResponse;
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{auth::CurrentUser, error_handling::AppError},
    services::sync::{SyncOrchestrator, provider_from_path},
};

#[axum::debug_handler]
pub async fn sync_provider(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Path(provider): Path<String>,
) -> Result<Json<SyncResponse>, AppError> {
    let kind = provider_from_path(&provider)?;

    let orchestrator = SyncOrchestrator {
        store: state.synced.as_ref(),
    };
    let response = orchestrator
        .sync(user_id, kind, state.providers.get(kind))
        .await?;

    Ok(Json(response))
}
