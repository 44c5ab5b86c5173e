use axum::{
    Json,
    extract::{Path, Query, State},
};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::role::require_staff;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateStudentProfileDto, Student, StudentFilterParams, UpdateStudentStatusDto};
use super::service::StudentService;

/// Create the caller's student profile
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentProfileDto,
    responses(
        (status = 201, description = "Student profile created", body = Student),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 409, description = "Profile already exists for this user", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateStudentProfileDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let user_id = auth_user.user_id()?;
    let student = StudentService::create_profile(&state.db, user_id, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Get the caller's student profile, or null when absent
#[utoipa::path(
    get,
    path = "/api/students/me",
    responses(
        (status = 200, description = "The caller's student profile, or null", body = Option<Student>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_my_student_profile(
    State(state): State<AppState>,
    maybe_user: MaybeAuthUser,
) -> Result<Json<Option<Student>>, AppError> {
    let Some(user_id) = maybe_user.user_id() else {
        return Ok(Json(None));
    };

    let student = StudentService::get_by_user(&state.db, user_id).await?;
    Ok(Json(student))
}

/// List students, optionally filtered by status
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "List of students", body = Vec<Student>),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden - staff only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<StudentFilterParams>,
) -> Result<Json<Vec<Student>>, AppError> {
    require_staff(&state.db, &auth_user).await?;

    let students = StudentService::list(&state.db, params.status).await?;
    Ok(Json(students))
}

/// Update a student's status
#[utoipa::path(
    patch,
    path = "/api/students/{id}/status",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentStatusDto,
    responses(
        (status = 200, description = "Student status updated", body = Student),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden - staff only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn update_student_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateStudentStatusDto>,
) -> Result<Json<Student>, AppError> {
    require_staff(&state.db, &auth_user).await?;

    let student = StudentService::update_status(&state.db, id, dto.status).await?;
    Ok(Json(student))
}
