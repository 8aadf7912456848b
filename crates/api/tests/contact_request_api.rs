//! HTTP-level integration tests for contact request submission.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_form};
use shelter_core::validation::PHONE_MAX_LEN;
use sqlx::PgPool;

async fn contact_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_requests")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_contact_request_echoes_stored_values(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), tmp.path());

    let response = post_form(
        app,
        "/api/v1/contact-requests",
        "name=Ana+Garc%C3%ADa&phone=%2B34+600+123+456",
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Ana García");
    assert_eq!(json["data"]["phone"], "+34 600 123 456");
    assert!(json["data"]["id"].is_number());

    let (name, phone): (String, String) =
        sqlx::query_as("SELECT name, phone FROM contact_requests")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(name, "Ana García");
    assert_eq!(phone, "+34 600 123 456");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_phone_changes_nothing(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), tmp.path());

    let response = post_form(app, "/api/v1/contact-requests", "name=Ana&phone=").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("phone"));
    assert_eq!(contact_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_fields_are_treated_as_empty(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), tmp.path());

    let response = post_form(app, "/api/v1/contact-requests", "").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(contact_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlong_phone_is_a_validation_error(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), tmp.path());
    let body = format!("name=Ana&phone={}", "9".repeat(PHONE_MAX_LEN + 1));

    let response = post_form(app, "/api/v1/contact-requests", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert_eq!(contact_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn store_failure_does_not_leak_driver_error(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), tmp.path());
    pool.close().await;

    let response = post_form(app, "/api/v1/contact-requests", "name=Ana&phone=555").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], shelter_api::error::GENERIC_FAILURE);
    assert!(!json["error"].as_str().unwrap().to_lowercase().contains("pool"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_form_body_uses_error_envelope(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), tmp.path());

    let request = axum::http::Request::post("/api/v1/contact-requests")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"name":"Ana","phone":"555"}"#))
        .unwrap();
    let response = common::send(app, request).await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNSUPPORTED_MEDIA_TYPE");
    assert!(json["error"].is_string());
    assert_eq!(contact_count(&pool).await, 0);
}
