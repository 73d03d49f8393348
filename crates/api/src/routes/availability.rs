use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/schedule/available-slots",
        get(handlers::availability::get_available_slots),
    )
}
