use axum::{
    Json,
    extract::{Query, State},
};
use calhub_core::{
    availability::compute_slots,
    errors::CalError,
    models::time_slot::AvailableSlotsResponse,
    parse::parse_date,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{auth::CurrentUser, error_handling::AppError},
};

#[derive(Debug, Default, Deserialize)]
pub struct AvailableSlotsQuery {
    pub date: Option<String>,
}

/// Bookable slots of the caller's schedule on one date. Dates outside the
/// schedule or on days off are a 200 with no slots and a message.
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let date = query
        .date
        .filter(|date| !date.trim().is_empty())
        .ok_or_else(|| CalError::Validation("Date parameter is required".to_string()))?;
    let date = parse_date("date", &date)?;

    let schedule = state
        .schedules
        .get_schedule(user_id)
        .await?
        .ok_or_else(|| CalError::NotFound("No schedule found".to_string()))?;

    let outcome = compute_slots(&schedule.rule, date)?;
    tracing::debug!(
        "Computed {} slots for user {} on {}",
        outcome.slots().len(),
        user_id,
        date
    );

    Ok(Json(AvailableSlotsResponse {
        message: outcome.message().map(str::to_string),
        slots: outcome.into_slots(),
    }))
}
