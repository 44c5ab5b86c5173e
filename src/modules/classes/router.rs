use axum::{Router, routing::get, routing::post};

use crate::state::AppState;

use super::controller::{create_class, get_class_by_id, list_active_classes};

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_class).get(list_active_classes))
        .route("/{id}", get(get_class_by_id))
}
