use axum::{Router, routing::get, routing::post};

use crate::state::AppState;

use super::controller::{
    create_staff_profile, get_my_staff_profile, list_active_teachers, list_staff,
};

pub fn init_staff_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_staff_profile).get(list_staff))
        .route("/me", get(get_my_staff_profile))
        .route("/teachers", get(list_active_teachers))
}
