//! Class domain models and DTOs.
//!
//! A class carries a weekly schedule as a JSONB array of slots. Slot times
//! are opaque "HH:MM" strings; the format is validated at the boundary but
//! slots are not checked for overlap.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "class_level", rename_all = "lowercase")]
pub enum ClassLevel {
    Basic,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "class_type", rename_all = "lowercase")]
pub enum ClassType {
    Regular,
    Workshop,
    Private,
    Other,
}

/// Class status. Forced to `Active` on creation; no exposed operation
/// transitions it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "class_status", rename_all = "lowercase")]
pub enum ClassStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ScheduleSlot {
    pub day_of_week: DayOfWeek,
    /// Start time as "HH:MM"
    #[validate(custom(function = validate_time_hhmm))]
    pub start_time: String,
    /// End time as "HH:MM"
    #[validate(custom(function = validate_time_hhmm))]
    pub end_time: String,
}

fn validate_time_hhmm(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 5
        && value.as_bytes()[2] == b':'
        && value[0..2].parse::<u8>().is_ok_and(|h| h < 24)
        && value[3..5].parse::<u8>().is_ok_and(|m| m < 60);

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("time_format")
            .with_message("time must be formatted as HH:MM".into()))
    }
}

/// A dance class.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DanceClass {
    pub id: Uuid,
    /// Dance style label, free text (e.g. "Ballet", "Forró")
    pub modality: String,
    pub level: ClassLevel,
    pub class_type: ClassType,
    pub start_date: chrono::NaiveDate,
    pub end_date: Option<chrono::NaiveDate>,
    #[schema(value_type = Vec<ScheduleSlot>)]
    pub schedule: Json<Vec<ScheduleSlot>>,
    /// Duration in minutes
    pub duration: i32,
    pub price: f64,
    pub enrollment_fee: Option<f64>,
    pub status: ClassStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A teacher assignment joined with the staff full name.
///
/// `teacher_name` is `None` when the referenced staff record does not
/// resolve; a dangling assignment is surfaced, not treated as an error.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassTeacherView {
    pub id: Uuid,
    pub class_id: Uuid,
    pub teacher_id: Uuid,
    /// Teacher commission as a percentage of class revenue
    pub commission: f64,
    pub teacher_name: Option<String>,
}

/// A class enriched with its teacher assignments.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassWithTeachers {
    #[serde(flatten)]
    pub class: DanceClass,
    pub teachers: Vec<ClassTeacherView>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TeacherAssignmentDto {
    pub teacher_id: Uuid,
    #[validate(range(min = 0.0, max = 100.0, message = "commission must be between 0 and 100"))]
    pub commission: f64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1, message = "modality must not be empty"))]
    pub modality: String,
    pub level: ClassLevel,
    pub class_type: ClassType,
    pub start_date: chrono::NaiveDate,
    pub end_date: Option<chrono::NaiveDate>,
    #[validate(nested)]
    pub schedule: Vec<ScheduleSlot>,
    #[validate(range(min = 1, message = "duration must be positive"))]
    pub duration: i32,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "enrollment_fee must not be negative"))]
    pub enrollment_fee: Option<f64>,
    /// Teachers are attached at creation time only; no post-creation
    /// add/remove operation exists. An empty list is accepted.
    #[validate(nested)]
    pub teachers: Vec<TeacherAssignmentDto>,
}
