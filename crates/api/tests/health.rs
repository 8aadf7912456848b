//! `/health` reporting and the cross-cutting headers every response carries.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database_and_upload_dir(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, tmp.path());

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["uploads_healthy"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_upload_dir_degrades_health(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, &tmp.path().join("never-created"));

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["uploads_healthy"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn closed_pool_degrades_health(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), tmp.path());
    pool.close().await;

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["db_healthy"], false);
    assert_eq!(json["uploads_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_response_carries_a_request_id(pool: PgPool) {
    let tmp = tempfile::tempdir().unwrap();

    for uri in ["/health", "/api/v1/dogs", "/no-such-page"] {
        let app = common::build_test_app(pool.clone(), tmp.path());
        let response = get(app, uri).await;
        let id = response
            .headers()
            .get("x-request-id")
            .unwrap_or_else(|| panic!("{uri} answered without x-request-id"));
        assert_eq!(id.to_str().unwrap().len(), 36);
    }
}
