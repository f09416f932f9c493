use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/activities", get(handlers::get_activities))
        .route("/api/activities/status", put(handlers::update_status))
        .route("/api/heatmap", get(handlers::get_heatmap))
        .route(
            "/api/weight",
            get(handlers::get_weight).put(handlers::add_weight),
        )
        .route("/api/weight/series", get(handlers::get_weight_series))
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/tasks/:id",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .with_state(state)
}
