use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequest, User};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let existing_user =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if existing_user.is_some() {
            return Err(AppError::conflict(format!(
                "An account with email {} already exists",
                dto.email
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password)
             VALUES ($1, $2)
             RETURNING id, email, created_at",
        )
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            email: String,
            password: String,
            created_at: chrono::DateTime<chrono::Utc>,
        }

        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, email, password, created_at FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password".to_string()))?;

        let is_valid = verify_password(&dto.password, &row.password)?;

        if !is_valid {
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let access_token = create_access_token(row.id, &row.email, jwt_config)?;

        Ok(LoginResponse {
            access_token,
            user: User {
                id: row.id,
                email: row.email,
                created_at: row.created_at,
            },
        })
    }
}
