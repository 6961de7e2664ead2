//! Shared harness for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! and drives it with `tower::ServiceExt::oneshot`, no TCP listener
//! involved. Also provides seed helpers for tenants, members, services,
//! and tokens.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use slotbook_api::auth::jwt::{generate_access_token, JwtConfig};
use slotbook_api::config::ServerConfig;
use slotbook_api::router::build_app_router;
use slotbook_api::state::AppState;
use slotbook_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(slotbook_events::EventBus::default()),
    };
    build_app_router(state, &config)
}

/// Mint a Bearer token for a seeded member.
pub fn auth_token(user_id: DbId, tenant_id: DbId) -> String {
    generate_access_token(user_id, tenant_id, "owner", &test_config().jwt)
        .expect("token generation must succeed in tests")
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn get_unauthenticated(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// A seeded tenant with one member, one service, and a valid token.
pub struct TestTenant {
    pub tenant_id: DbId,
    pub user_id: DbId,
    pub service_id: DbId,
    pub token: String,
}

/// Seed a tenant open 09:00-17:00 every day, with one member and one
/// active service priced at 5000 cents.
pub async fn seed_tenant(pool: &PgPool, name: &str) -> TestTenant {
    let all_day = serde_json::json!({ "open": "09:00:00", "close": "17:00:00", "breaks": [] });
    seed_tenant_with_schedule(pool, name, week_of(&all_day)).await
}

/// Week schedule JSON applying the same working hours to every weekday.
pub fn week_of(day: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "monday": day, "tuesday": day, "wednesday": day,
        "thursday": day, "friday": day, "saturday": day,
        "sunday": day,
    })
}

/// Seed a tenant with an explicit week schedule (JSON form of
/// `WeekSchedule`).
pub async fn seed_tenant_with_schedule(
    pool: &PgPool,
    name: &str,
    week_schedule: serde_json::Value,
) -> TestTenant {
    let (tenant_id,): (DbId,) =
        sqlx::query_as("INSERT INTO tenants (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap();

    let (user_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO users (email, display_name) VALUES ($1, $2) RETURNING id",
    )
    .bind(format!("{name}@example.com"))
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO tenant_members (user_id, tenant_id, role) VALUES ($1, $2, 'owner')")
        .bind(user_id)
        .bind(tenant_id)
        .execute(pool)
        .await
        .unwrap();

    sqlx::query(
        "INSERT INTO tenant_schedule_settings
            (tenant_id, auto_confirm_bookings, min_horizon_days, max_horizon_days, week_schedule)
         VALUES ($1, FALSE, 0, 90, $2)",
    )
    .bind(tenant_id)
    .bind(week_schedule)
    .execute(pool)
    .await
    .unwrap();

    let (service_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO services (tenant_id, name, price_cents, duration_minutes)
         VALUES ($1, 'Consultation', 5000, 60) RETURNING id",
    )
    .bind(tenant_id)
    .fetch_one(pool)
    .await
    .unwrap();

    TestTenant {
        tenant_id,
        user_id,
        service_id,
        token: auth_token(user_id, tenant_id),
    }
}

/// Flip the tenant's auto-confirm policy.
pub async fn set_auto_confirm(pool: &PgPool, tenant_id: DbId, enabled: bool) {
    sqlx::query(
        "UPDATE tenant_schedule_settings SET auto_confirm_bookings = $2 WHERE tenant_id = $1",
    )
    .bind(tenant_id)
    .bind(enabled)
    .execute(pool)
    .await
    .unwrap();
}

/// Seed an extra registered user (e.g. a customer or staff member) and
/// enrol them in the tenant.
pub async fn seed_member(pool: &PgPool, tenant_id: DbId, email: &str) -> DbId {
    let (user_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO users (email, display_name) VALUES ($1, $1) RETURNING id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO tenant_members (user_id, tenant_id, role) VALUES ($1, $2, 'staff')")
        .bind(user_id)
        .bind(tenant_id)
        .execute(pool)
        .await
        .unwrap();
    user_id
}
