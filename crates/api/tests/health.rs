mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{body_json, build_test_app, get_unauthenticated};

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_ok_with_live_database(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get_unauthenticated(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
    assert!(body["version"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn health_does_not_require_authentication(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get_unauthenticated(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}
