use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    create_student_profile, get_my_student_profile, list_students, update_student_status,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student_profile).get(list_students))
        .route("/me", get(get_my_student_profile))
        .route("/{id}/status", patch(update_student_status))
}
