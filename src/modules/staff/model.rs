//! Staff domain models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::modules::students::model::ProfileStatus;

/// Staff role. Gates mutation access: `Admin` and `Staff` manage classes,
/// any role may manage enrollments and student statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "staff_role", rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Teacher,
    Staff,
}

/// A staff profile. Owned one-to-one by a user account; the role is
/// immutable after creation (no update-role operation exists) and the
/// record is never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StaffMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub role: StaffRole,
    pub email: String,
    pub whatsapp: String,
    pub cpf: String,
    pub status: ProfileStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStaffProfileDto {
    #[validate(length(min = 1, message = "full_name must not be empty"))]
    pub full_name: String,
    pub role: StaffRole,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "whatsapp must not be empty"))]
    pub whatsapp: String,
    #[validate(length(min = 11, max = 14, message = "cpf must be 11 to 14 characters"))]
    pub cpf: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct StaffFilterParams {
    /// Filter by staff role
    pub role: Option<StaffRole>,
}
