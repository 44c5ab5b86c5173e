use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::require_class_manager;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{ClassWithTeachers, CreateClassDto};
use super::service::ClassService;

/// Create a class with its teacher assignments
#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created", body = ClassWithTeachers),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden - administrative staff only", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn create_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, Json<ClassWithTeachers>), AppError> {
    require_class_manager(&state.db, &auth_user).await?;

    let class = ClassService::create_class(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// List active classes with their teachers
#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "Active classes", body = Vec<ClassWithTeachers>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn list_active_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassWithTeachers>>, AppError> {
    let classes = ClassService::list_active(&state.db).await?;
    Ok(Json(classes))
}

/// Get a class by id, or null when absent
#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "The class with its teachers, or null", body = Option<ClassWithTeachers>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_class_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<ClassWithTeachers>>, AppError> {
    let class = ClassService::get_by_id(&state.db, id).await?;
    Ok(Json(class))
}
