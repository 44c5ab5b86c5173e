//! Role-based authorization checks.
//!
//! Roles live on the caller's staff profile, not in the JWT, so every check
//! re-reads the staff table by the authenticated user id. The persistence
//! store owns all state; nothing is cached between requests.

use sqlx::PgPool;

use crate::middleware::auth::AuthUser;
use crate::modules::staff::model::{StaffMember, StaffRole};
use crate::utils::errors::AppError;

/// Look up the caller's staff profile, if any. Read-only, no side effects.
pub async fn find_staff_profile(
    db: &PgPool,
    auth_user: &AuthUser,
) -> Result<Option<StaffMember>, AppError> {
    let user_id = auth_user.user_id()?;

    let staff = sqlx::query_as::<_, StaffMember>(
        "SELECT id, user_id, full_name, role, email, whatsapp, cpf, status,
                created_at, updated_at
         FROM staff
         WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .map_err(AppError::database)?;

    Ok(staff)
}

/// Require the caller to hold a staff profile of any role.
pub async fn require_staff(db: &PgPool, auth_user: &AuthUser) -> Result<StaffMember, AppError> {
    find_staff_profile(db, auth_user)
        .await?
        .ok_or_else(|| AppError::forbidden("Access denied. Staff profile required.".to_string()))
}

/// Require the caller to hold a staff profile with role `admin`.
pub async fn require_admin(db: &PgPool, auth_user: &AuthUser) -> Result<StaffMember, AppError> {
    let staff = require_staff(db, auth_user).await?;

    if staff.role != StaffRole::Admin {
        return Err(AppError::forbidden(
            "Access denied. Administrator privileges required.".to_string(),
        ));
    }

    Ok(staff)
}

/// Require the caller to hold a staff profile with role `admin` or `staff`.
///
/// Gates class creation: teachers hold staff profiles but cannot manage
/// classes.
pub async fn require_class_manager(
    db: &PgPool,
    auth_user: &AuthUser,
) -> Result<StaffMember, AppError> {
    let staff = require_staff(db, auth_user).await?;

    if staff.role != StaffRole::Admin && staff.role != StaffRole::Staff {
        return Err(AppError::forbidden(
            "Access denied. Administrative staff privileges required.".to_string(),
        ));
    }

    Ok(staff)
}
