//! Student domain models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Shared active/inactive status for student and staff profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "profile_status", rename_all = "lowercase")]
pub enum ProfileStatus {
    Active,
    Inactive,
}

/// A student profile. Owned one-to-one by a user account; the owning user
/// reference is immutable after creation and the record is never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub cpf: String,
    pub whatsapp: String,
    pub email: String,
    /// Optional partner/dependent reference. One-directional; no cycle
    /// check is performed.
    pub partner_id: Option<Uuid>,
    pub gender: Gender,
    pub status: ProfileStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentProfileDto {
    #[validate(length(min = 1, message = "full_name must not be empty"))]
    pub full_name: String,
    #[validate(length(min = 11, max = 14, message = "cpf must be 11 to 14 characters"))]
    pub cpf: String,
    #[validate(length(min = 1, message = "whatsapp must not be empty"))]
    pub whatsapp: String,
    #[validate(email)]
    pub email: String,
    pub partner_id: Option<Uuid>,
    pub gender: Gender,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStudentStatusDto {
    pub status: ProfileStatus,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct StudentFilterParams {
    /// Filter by profile status
    pub status: Option<ProfileStatus>,
}
