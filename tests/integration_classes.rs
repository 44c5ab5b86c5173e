mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_test_staff, create_test_user, generate_unique_email, get_auth_token, setup_test_app,
};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

fn class_body(teachers: serde_json::Value) -> serde_json::Value {
    json!({
        "modality": "Ballet",
        "level": "basic",
        "class_type": "regular",
        "start_date": "2026-02-02",
        "end_date": "2026-11-30",
        "schedule": [
            {"day_of_week": "tuesday", "start_time": "19:00", "end_time": "20:30"},
            {"day_of_week": "thursday", "start_time": "19:00", "end_time": "20:30"}
        ],
        "duration": 90,
        "price": 250.0,
        "enrollment_fee": 50.0,
        "teachers": teachers
    })
}

async fn post_class(
    pool: &PgPool,
    token: &str,
    body: &serde_json::Value,
) -> axum::response::Response {
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/classes")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_class_round_trip(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin_email = generate_unique_email();
    let admin_user = create_test_user(&mut tx, &admin_email, "testpass123").await;
    create_test_staff(&mut tx, admin_user.id, "Carla Admin", "admin").await;

    let teacher_user = create_test_user(&mut tx, &generate_unique_email(), "pass12345").await;
    let teacher_id = create_test_staff(&mut tx, teacher_user.id, "Bruno Teacher", "teacher").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &admin_email, "testpass123").await;

    let body = class_body(json!([{"teacher_id": teacher_id, "commission": 10.0}]));
    let response = post_class(&pool, &token, &body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = response.into_body().collect().await.unwrap().to_bytes();
    let created: serde_json::Value = serde_json::from_slice(&created).unwrap();
    let class_id = created["id"].as_str().unwrap().to_string();
    // Status is forced to active regardless of input
    assert_eq!(created["status"], "active");

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/classes/{}", class_id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = response.into_body().collect().await.unwrap().to_bytes();
    let fetched: serde_json::Value = serde_json::from_slice(&fetched).unwrap();

    assert_eq!(fetched["modality"], "Ballet");
    assert_eq!(fetched["level"], "basic");
    assert_eq!(fetched["class_type"], "regular");
    assert_eq!(fetched["start_date"], "2026-02-02");
    assert_eq!(fetched["end_date"], "2026-11-30");
    assert_eq!(fetched["duration"], 90);
    assert_eq!(fetched["price"], 250.0);
    assert_eq!(fetched["enrollment_fee"], 50.0);
    assert_eq!(fetched["schedule"].as_array().unwrap().len(), 2);
    assert_eq!(fetched["schedule"][0]["day_of_week"], "tuesday");
    assert_eq!(fetched["schedule"][0]["start_time"], "19:00");

    let teachers = fetched["teachers"].as_array().unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0]["teacher_id"], teacher_id.to_string());
    assert_eq!(teachers[0]["commission"], 10.0);
    assert_eq!(teachers[0]["teacher_name"], "Bruno Teacher");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_class_as_generic_staff(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, "testpass123").await;
    create_test_staff(&mut tx, user.id, "Diego Staff", "staff").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, "testpass123").await;

    let response = post_class(&pool, &token, &class_body(json!([]))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_class_as_teacher_forbidden(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, "testpass123").await;
    create_test_staff(&mut tx, user.id, "Bruno Teacher", "teacher").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, "testpass123").await;

    let response = post_class(&pool, &token, &class_body(json!([]))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_class_without_staff_profile_forbidden(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, "testpass123").await;

    let response = post_class(&pool, &token, &class_body(json!([]))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_class_unauthenticated(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/classes")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&class_body(json!([]))).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_class_rejects_bad_time_format(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, "testpass123").await;
    create_test_staff(&mut tx, user.id, "Carla Admin", "admin").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, "testpass123").await;

    let mut body = class_body(json!([]));
    body["schedule"][0]["start_time"] = json!("25:99");

    let response = post_class(&pool, &token, &body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_active_classes_public(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, "testpass123").await;
    create_test_staff(&mut tx, user.id, "Carla Admin", "admin").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, "testpass123").await;

    let response = post_class(&pool, &token, &class_body(json!([]))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // No authorization header: listing is public
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/classes")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let classes = body.as_array().unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0]["modality"], "Ballet");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_class_by_id_missing_is_null(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/classes/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body.is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_dangling_teacher_reference_yields_null_name(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, "testpass123").await;
    create_test_staff(&mut tx, user.id, "Carla Admin", "admin").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, "testpass123").await;

    // teacher_id that resolves to no staff record
    let body = class_body(json!([{"teacher_id": Uuid::new_v4(), "commission": 15.0}]));
    let response = post_class(&pool, &token, &body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = response.into_body().collect().await.unwrap().to_bytes();
    let created: serde_json::Value = serde_json::from_slice(&created).unwrap();

    let teachers = created["teachers"].as_array().unwrap();
    assert_eq!(teachers.len(), 1);
    assert!(teachers[0]["teacher_name"].is_null());
    assert_eq!(teachers[0]["commission"], 15.0);
}
