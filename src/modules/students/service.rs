use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateStudentProfileDto, ProfileStatus, Student};

const STUDENT_COLUMNS: &str = "id, user_id, full_name, cpf, whatsapp, email, partner_id, \
                               gender, status, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    /// Create the student profile owned by `user_id`. One profile per user:
    /// a second call for the same identity fails with a conflict.
    #[instrument(skip(db, dto))]
    pub async fn create_profile(
        db: &PgPool,
        user_id: Uuid,
        dto: CreateStudentProfileDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_by_user(db, user_id).await?;

        if existing.is_some() {
            return Err(AppError::conflict(
                "A student profile already exists for this user".to_string(),
            ));
        }

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (user_id, full_name, cpf, whatsapp, email, partner_id, gender, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'active')
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&dto.full_name)
        .bind(&dto.cpf)
        .bind(&dto.whatsapp)
        .bind(&dto.email)
        .bind(dto.partner_id)
        .bind(dto.gender)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(
                        "A student profile already exists for this user".to_string(),
                    );
                }
            }
            AppError::database(e)
        })?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_by_user(db: &PgPool, user_id: Uuid) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        status: Option<ProfileStatus>,
    ) -> Result<Vec<Student>, AppError> {
        let students = match status {
            Some(status) => {
                sqlx::query_as::<_, Student>(&format!(
                    "SELECT {STUDENT_COLUMNS} FROM students WHERE status = $1 ORDER BY full_name"
                ))
                .bind(status)
                .fetch_all(db)
                .await
            }
            None => {
                sqlx::query_as::<_, Student>(&format!(
                    "SELECT {STUDENT_COLUMNS} FROM students ORDER BY full_name"
                ))
                .fetch_all(db)
                .await
            }
        }
        .map_err(AppError::database)?;

        Ok(students)
    }

    /// Patch the status field only. A missing id is a NotFound failure.
    #[instrument(skip(db))]
    pub async fn update_status(
        db: &PgPool,
        id: Uuid,
        status: ProfileStatus,
    ) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET status = $1, updated_at = NOW()
             WHERE id = $2
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }
}
