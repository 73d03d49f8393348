use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/meetings",
            get(handlers::meetings::list_meetings).post(handlers::meetings::create_meeting),
        )
        .route(
            "/meetings/:id",
            get(handlers::meetings::get_meeting)
                .put(handlers::meetings::update_meeting)
                .delete(handlers::meetings::delete_meeting),
        )
}
