use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateStaffProfileDto, StaffMember, StaffRole};

const STAFF_COLUMNS: &str = "id, user_id, full_name, role, email, whatsapp, cpf, status, \
                             created_at, updated_at";

pub struct StaffService;

impl StaffService {
    /// Create the staff profile owned by `user_id`. One profile per user;
    /// holding a student profile as well is allowed.
    #[instrument(skip(db, dto))]
    pub async fn create_profile(
        db: &PgPool,
        user_id: Uuid,
        dto: CreateStaffProfileDto,
    ) -> Result<StaffMember, AppError> {
        let existing = Self::get_by_user(db, user_id).await?;

        if existing.is_some() {
            return Err(AppError::conflict(
                "A staff profile already exists for this user".to_string(),
            ));
        }

        let staff = sqlx::query_as::<_, StaffMember>(&format!(
            "INSERT INTO staff (user_id, full_name, role, email, whatsapp, cpf, status)
             VALUES ($1, $2, $3, $4, $5, $6, 'active')
             RETURNING {STAFF_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&dto.full_name)
        .bind(dto.role)
        .bind(&dto.email)
        .bind(&dto.whatsapp)
        .bind(&dto.cpf)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(
                        "A staff profile already exists for this user".to_string(),
                    );
                }
            }
            AppError::database(e)
        })?;

        Ok(staff)
    }

    #[instrument(skip(db))]
    pub async fn get_by_user(db: &PgPool, user_id: Uuid) -> Result<Option<StaffMember>, AppError> {
        let staff = sqlx::query_as::<_, StaffMember>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        Ok(staff)
    }

    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, role: Option<StaffRole>) -> Result<Vec<StaffMember>, AppError> {
        let staff = match role {
            Some(role) => {
                sqlx::query_as::<_, StaffMember>(&format!(
                    "SELECT {STAFF_COLUMNS} FROM staff WHERE role = $1 ORDER BY full_name"
                ))
                .bind(role)
                .fetch_all(db)
                .await
            }
            None => {
                sqlx::query_as::<_, StaffMember>(&format!(
                    "SELECT {STAFF_COLUMNS} FROM staff ORDER BY full_name"
                ))
                .fetch_all(db)
                .await
            }
        }
        .map_err(AppError::database)?;

        Ok(staff)
    }

    /// Active teachers, for the class creation form.
    #[instrument(skip(db))]
    pub async fn list_active_teachers(db: &PgPool) -> Result<Vec<StaffMember>, AppError> {
        let teachers = sqlx::query_as::<_, StaffMember>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff
             WHERE role = 'teacher' AND status = 'active'
             ORDER BY full_name"
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(teachers)
    }
}
