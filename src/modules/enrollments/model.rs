//! Enrollment domain models and DTOs.
//!
//! Enrollment lifecycle: `active → canceled`, terminal. `Suspended` is
//! reserved for a future suspension workflow; no operation assigns it.
//! Likewise `Paid` and `Overdue` are reserved payment states; only the
//! initial `Pending` is ever set.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::classes::model::DanceClass;
use crate::modules::students::model::Student;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "enrollment_status", rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Canceled,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

/// A student's enrollment in a class.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub class_id: Uuid,
    /// Wall-clock date at creation (UTC)
    pub enrollment_date: chrono::NaiveDate,
    pub status: EnrollmentStatus,
    pub payment_status: PaymentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EnrollStudentDto {
    pub student_id: Uuid,
    pub class_id: Uuid,
}

/// An enrollment joined with its class; `class` is `None` when the
/// reference does not resolve.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentWithClass {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub class: Option<DanceClass>,
}

/// An enrollment joined with its student; `student` is `None` when the
/// reference does not resolve.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentWithStudent {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub student: Option<Student>,
}
