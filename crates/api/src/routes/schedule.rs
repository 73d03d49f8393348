use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/schedule",
        get(handlers::schedule::get_schedule)
            .post(handlers::schedule::save_schedule)
            .delete(handlers::schedule::delete_schedule),
    )
}
