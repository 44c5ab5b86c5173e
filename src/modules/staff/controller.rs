use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::role::require_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateStaffProfileDto, StaffFilterParams, StaffMember};
use super::service::StaffService;

/// Create the caller's staff profile
#[utoipa::path(
    post,
    path = "/api/staff",
    request_body = CreateStaffProfileDto,
    responses(
        (status = 201, description = "Staff profile created", body = StaffMember),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 409, description = "Profile already exists for this user", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state, dto))]
pub async fn create_staff_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateStaffProfileDto>,
) -> Result<(StatusCode, Json<StaffMember>), AppError> {
    let user_id = auth_user.user_id()?;
    let staff = StaffService::create_profile(&state.db, user_id, dto).await?;
    Ok((StatusCode::CREATED, Json(staff)))
}

/// Get the caller's staff profile, or null when absent
#[utoipa::path(
    get,
    path = "/api/staff/me",
    responses(
        (status = 200, description = "The caller's staff profile, or null", body = Option<StaffMember>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state))]
pub async fn get_my_staff_profile(
    State(state): State<AppState>,
    maybe_user: MaybeAuthUser,
) -> Result<Json<Option<StaffMember>>, AppError> {
    let Some(user_id) = maybe_user.user_id() else {
        return Ok(Json(None));
    };

    let staff = StaffService::get_by_user(&state.db, user_id).await?;
    Ok(Json(staff))
}

/// List staff members, optionally filtered by role
#[utoipa::path(
    get,
    path = "/api/staff",
    params(StaffFilterParams),
    responses(
        (status = 200, description = "List of staff members", body = Vec<StaffMember>),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state))]
pub async fn list_staff(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<StaffFilterParams>,
) -> Result<Json<Vec<StaffMember>>, AppError> {
    require_admin(&state.db, &auth_user).await?;

    let staff = StaffService::list(&state.db, params.role).await?;
    Ok(Json(staff))
}

/// List active teachers
#[utoipa::path(
    get,
    path = "/api/staff/teachers",
    responses(
        (status = 200, description = "Active teachers", body = Vec<StaffMember>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Staff"
)]
#[instrument(skip(state))]
pub async fn list_active_teachers(
    State(state): State<AppState>,
) -> Result<Json<Vec<StaffMember>>, AppError> {
    let teachers = StaffService::list_active_teachers(&state.db).await?;
    Ok(Json(teachers))
}
