use axum::body::Body;
use axum::http::Request;
use compasso::config::cors::CorsConfig;
use compasso::config::jwt::JwtConfig;
use compasso::router::init_router;
use compasso::state::AppState;
use compasso::utils::password::hash_password;
use http_body_util::BodyExt;
use serde_json::json;
#[allow(unused_imports)]
use sqlx::{PgPool, Postgres, Transaction};
use tower::ServiceExt;
use uuid::Uuid;

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool.clone(),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

/// Insert a user account directly; profiles are created separately.
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// Insert a staff profile for a user. `role` is one of "admin", "teacher",
/// "staff".
#[allow(dead_code)]
pub async fn create_test_staff(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    full_name: &str,
    role: &str,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO staff (user_id, full_name, role, email, whatsapp, cpf, status)
         VALUES ($1, $2, $3::staff_role, $4, $5, $6, 'active')
         RETURNING id",
    )
    .bind(user_id)
    .bind(full_name)
    .bind(role)
    .bind(generate_unique_email())
    .bind("+5511999990000")
    .bind(generate_unique_cpf())
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

/// Insert a student profile for a user.
#[allow(dead_code)]
pub async fn create_test_student(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    full_name: &str,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO students (user_id, full_name, cpf, whatsapp, email, gender, status)
         VALUES ($1, $2, $3, $4, $5, 'female', 'active')
         RETURNING id",
    )
    .bind(user_id)
    .bind(full_name)
    .bind(generate_unique_cpf())
    .bind("+5511999990000")
    .bind(generate_unique_email())
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

/// Insert an active class with an empty schedule.
#[allow(dead_code)]
pub async fn create_test_class(tx: &mut Transaction<'_, Postgres>, modality: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO classes (modality, level, class_type, start_date, duration, price, status)
         VALUES ($1, 'basic', 'regular', '2026-01-05', 60, 150.0, 'active')
         RETURNING id",
    )
    .bind(modality)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_cpf() -> String {
    // 11 digits derived from a v4 uuid
    let digits: String = Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(11)
        .collect();
    format!("{:0>11}", digits)
}
