use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::classes::model::DanceClass;
use crate::modules::students::model::Student;
use crate::utils::errors::AppError;

use super::model::{EnrollStudentDto, Enrollment, EnrollmentWithClass, EnrollmentWithStudent};

const ENROLLMENT_COLUMNS: &str =
    "id, student_id, class_id, enrollment_date, status, payment_status, created_at";

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enroll a student in a class.
    ///
    /// At most one active enrollment may exist per (student, class) pair.
    /// The existence check runs first for a friendly message; the partial
    /// unique index backstops it, so a concurrent duplicate also maps to a
    /// conflict instead of slipping through.
    #[instrument(skip(db))]
    pub async fn enroll(db: &PgPool, dto: EnrollStudentDto) -> Result<Enrollment, AppError> {
        let student_exists =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM students WHERE id = $1")
                .bind(dto.student_id)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if student_exists.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        let class_exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM classes WHERE id = $1")
            .bind(dto.class_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;

        if class_exists.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM enrollments
             WHERE student_id = $1 AND class_id = $2 AND status = 'active'",
        )
        .bind(dto.student_id)
        .bind(dto.class_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::conflict(
                "Student is already enrolled in this class".to_string(),
            ));
        }

        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "INSERT INTO enrollments (student_id, class_id, enrollment_date, status, payment_status)
             VALUES ($1, $2, $3, 'active', 'pending')
             RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(dto.class_id)
        .bind(Utc::now().date_naive())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(
                        "Student is already enrolled in this class".to_string(),
                    );
                }
            }
            AppError::database(e)
        })?;

        Ok(enrollment)
    }

    /// Active enrollments for a student, each joined with its class.
    #[instrument(skip(db))]
    pub async fn active_for_student(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<EnrollmentWithClass>, AppError> {
        let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
             WHERE student_id = $1 AND status = 'active'
             ORDER BY enrollment_date",
        ))
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let class_ids: Vec<Uuid> = enrollments.iter().map(|e| e.class_id).collect();
        let classes = if class_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, DanceClass>(
                "SELECT id, modality, level, class_type, start_date, end_date, schedule,
                        duration, price, enrollment_fee, status, created_at, updated_at
                 FROM classes WHERE id = ANY($1)",
            )
            .bind(&class_ids)
            .fetch_all(db)
            .await
            .map_err(AppError::database)?
        };

        let mut by_id: HashMap<Uuid, DanceClass> =
            classes.into_iter().map(|c| (c.id, c)).collect();

        Ok(enrollments
            .into_iter()
            .map(|enrollment| {
                let class = by_id.remove(&enrollment.class_id);
                EnrollmentWithClass { enrollment, class }
            })
            .collect())
    }

    /// All enrollments for a class regardless of status, each joined with
    /// its student.
    #[instrument(skip(db))]
    pub async fn by_class(
        db: &PgPool,
        class_id: Uuid,
    ) -> Result<Vec<EnrollmentWithStudent>, AppError> {
        let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
             WHERE class_id = $1
             ORDER BY enrollment_date",
        ))
        .bind(class_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let student_ids: Vec<Uuid> = enrollments.iter().map(|e| e.student_id).collect();
        let students = if student_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, Student>(
                "SELECT id, user_id, full_name, cpf, whatsapp, email, partner_id, gender,
                        status, created_at, updated_at
                 FROM students WHERE id = ANY($1)",
            )
            .bind(&student_ids)
            .fetch_all(db)
            .await
            .map_err(AppError::database)?
        };

        let by_id: HashMap<Uuid, Student> = students.into_iter().map(|s| (s.id, s)).collect();

        Ok(enrollments
            .into_iter()
            .map(|enrollment| {
                let student = by_id.get(&enrollment.student_id).cloned();
                EnrollmentWithStudent {
                    enrollment,
                    student,
                }
            })
            .collect())
    }

    /// Cancel an enrollment.
    ///
    /// The transition is unconditional and terminal: canceling an
    /// already-canceled enrollment succeeds without change, and a canceled
    /// record never returns to active. A missing id is NotFound.
    #[instrument(skip(db))]
    pub async fn cancel(db: &PgPool, id: Uuid) -> Result<Enrollment, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "UPDATE enrollments SET status = 'canceled'
             WHERE id = $1
             RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Enrollment not found")))?;

        Ok(enrollment)
    }
}
