use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::role::require_staff;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{EnrollStudentDto, Enrollment, EnrollmentWithClass, EnrollmentWithStudent};
use super::service::EnrollmentService;

/// Enroll a student in a class
#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = EnrollStudentDto,
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden - staff only", body = ErrorResponse),
        (status = 404, description = "Student or class not found", body = ErrorResponse),
        (status = 409, description = "Student already enrolled in this class", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn enroll_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<EnrollStudentDto>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    require_staff(&state.db, &auth_user).await?;

    let enrollment = EnrollmentService::enroll(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// Get the caller's active enrollments with their classes
#[utoipa::path(
    get,
    path = "/api/enrollments/me",
    responses(
        (status = 200, description = "Active enrollments; empty when the caller has no student profile", body = Vec<EnrollmentWithClass>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn get_my_enrollments(
    State(state): State<AppState>,
    maybe_user: MaybeAuthUser,
) -> Result<Json<Vec<EnrollmentWithClass>>, AppError> {
    let Some(user_id) = maybe_user.user_id() else {
        return Ok(Json(Vec::new()));
    };

    let Some(student) = StudentService::get_by_user(&state.db, user_id).await? else {
        return Ok(Json(Vec::new()));
    };

    let enrollments = EnrollmentService::active_for_student(&state.db, student.id).await?;
    Ok(Json(enrollments))
}

/// List all enrollments for a class with their students
#[utoipa::path(
    get,
    path = "/api/enrollments/class/{class_id}",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Enrollments for the class, any status", body = Vec<EnrollmentWithStudent>),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden - staff only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn get_enrollments_by_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<Uuid>,
) -> Result<Json<Vec<EnrollmentWithStudent>>, AppError> {
    require_staff(&state.db, &auth_user).await?;

    let enrollments = EnrollmentService::by_class(&state.db, class_id).await?;
    Ok(Json(enrollments))
}

/// Cancel an enrollment
#[utoipa::path(
    post,
    path = "/api/enrollments/{id}/cancel",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment canceled", body = Enrollment),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden - staff only", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn cancel_enrollment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Enrollment>, AppError> {
    require_staff(&state.db, &auth_user).await?;

    let enrollment = EnrollmentService::cancel(&state.db, id).await?;
    Ok(Json(enrollment))
}
