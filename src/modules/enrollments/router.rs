use axum::{Router, routing::get, routing::post};

use crate::state::AppState;

use super::controller::{
    cancel_enrollment, enroll_student, get_enrollments_by_class, get_my_enrollments,
};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(enroll_student))
        .route("/me", get(get_my_enrollments))
        .route("/class/{class_id}", get(get_enrollments_by_class))
        .route("/{id}/cancel", post(cancel_enrollment))
}
