mod common;

use axum::http::StatusCode;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, get, post_json, seed_tenant_with_schedule, week_of, TestTenant,
};

fn day_out(offset: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(offset)
}

/// Tenant whose every weekday shares one working window.
async fn seed_with_hours(pool: &PgPool, name: &str, day: serde_json::Value) -> TestTenant {
    seed_tenant_with_schedule(pool, name, week_of(&day)).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn generates_slots_from_week_schedule(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let hours = json!({ "open": "09:00:00", "close": "11:00:00", "breaks": [] });
    let tenant = seed_with_hours(&pool, "acme", hours).await;
    let day = day_out(7);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/tenants/{}/slots/generate", tenant.tenant_id),
        &tenant.token,
        json!({
            "slot_duration_minutes": 60,
            "start_date": day,
            "end_date": day,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // 09:00-11:00 at 60 minutes tiles into exactly two slots.
    let summary = body_json(response).await;
    assert_eq!(summary["created"], 2);
    assert_eq!(summary["skipped"], 0);

    let response = get(
        app,
        &format!("/api/v1/tenants/{}/slots", tenant.tenant_id),
        &tenant.token,
    )
    .await;
    let slots = body_json(response).await;
    assert_eq!(slots.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn regeneration_is_idempotent(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let hours = json!({ "open": "09:00:00", "close": "11:00:00", "breaks": [] });
    let tenant = seed_with_hours(&pool, "acme", hours).await;
    let day = day_out(7);
    let uri = format!("/api/v1/tenants/{}/slots/generate", tenant.tenant_id);
    let body = json!({
        "slot_duration_minutes": 60,
        "start_date": day,
        "end_date": day,
    });

    let response = post_json(app.clone(), &uri, &tenant.token, body.clone()).await;
    assert_eq!(body_json(response).await["created"], 2);

    // Same range again: every candidate already exists.
    let response = post_json(app, &uri, &tenant.token, body).await;
    let summary = body_json(response).await;
    assert_eq!(summary["created"], 0);
    assert_eq!(summary["skipped"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn trailing_partial_slot_not_emitted(pool: PgPool) {
    let app = build_test_app(pool.clone());
    // 09:00-10:30 fits one 60-minute slot; the trailing 30 minutes are
    // dropped rather than shortened.
    let hours = json!({ "open": "09:00:00", "close": "10:30:00", "breaks": [] });
    let tenant = seed_with_hours(&pool, "acme", hours).await;
    let day = day_out(7);

    let response = post_json(
        app,
        &format!("/api/v1/tenants/{}/slots/generate", tenant.tenant_id),
        &tenant.token,
        json!({
            "slot_duration_minutes": 60,
            "start_date": day,
            "end_date": day,
        }),
    )
    .await;
    let summary = body_json(response).await;
    assert_eq!(summary["created"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn breaks_interrupt_tiling(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let hours = json!({
        "open": "09:00:00",
        "close": "13:00:00",
        "breaks": [{ "start": "10:00:00", "end": "11:00:00" }],
    });
    let tenant = seed_with_hours(&pool, "acme", hours).await;
    let day = day_out(7);

    let response = post_json(
        app,
        &format!("/api/v1/tenants/{}/slots/generate", tenant.tenant_id),
        &tenant.token,
        json!({
            "slot_duration_minutes": 60,
            "start_date": day,
            "end_date": day,
        }),
    )
    .await;
    // 09-10, then the break, then 11-12 and 12-13.
    let summary = body_json(response).await;
    assert_eq!(summary["created"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn closed_week_generates_nothing(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let tenant = seed_tenant_with_schedule(&pool, "acme", json!({})).await;
    let day = day_out(7);

    let response = post_json(
        app,
        &format!("/api/v1/tenants/{}/slots/generate", tenant.tenant_id),
        &tenant.token,
        json!({
            "slot_duration_minutes": 60,
            "start_date": day,
            "end_date": day + Duration::days(6),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(summary["created"], 0);
    assert_eq!(summary["skipped"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn generation_skips_manual_overlaps(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let hours = json!({ "open": "09:00:00", "close": "11:00:00", "breaks": [] });
    let tenant = seed_with_hours(&pool, "acme", hours).await;
    let day = day_out(7);

    // A hand-placed slot straddling both candidate boundaries.
    let start = day.and_hms_opt(9, 30, 0).unwrap().and_utc();
    let response = post_json(
        app.clone(),
        &format!("/api/v1/tenants/{}/slots", tenant.tenant_id),
        &tenant.token,
        json!({ "start_time": start, "end_time": start + Duration::hours(1) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        &format!("/api/v1/tenants/{}/slots/generate", tenant.tenant_id),
        &tenant.token,
        json!({
            "slot_duration_minutes": 60,
            "start_date": day,
            "end_date": day,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(summary["created"], 0);
    assert_eq!(summary["skipped"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn generation_rejects_invalid_ranges(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let hours = json!({ "open": "09:00:00", "close": "17:00:00", "breaks": [] });
    let tenant = seed_with_hours(&pool, "acme", hours).await;
    let uri = format!("/api/v1/tenants/{}/slots/generate", tenant.tenant_id);

    let cases = [
        // End before start.
        json!({
            "slot_duration_minutes": 60,
            "start_date": day_out(8),
            "end_date": day_out(7),
        }),
        // Start in the past.
        json!({
            "slot_duration_minutes": 60,
            "start_date": day_out(-1),
            "end_date": day_out(1),
        }),
        // Beyond the 90-day horizon.
        json!({
            "slot_duration_minutes": 60,
            "start_date": day_out(7),
            "end_date": day_out(200),
        }),
        // Non-positive duration.
        json!({
            "slot_duration_minutes": 0,
            "start_date": day_out(7),
            "end_date": day_out(7),
        }),
    ];

    for body in cases {
        let response = post_json(app.clone(), &uri, &tenant.token, body.clone()).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected rejection for {body}"
        );
        assert_eq!(body_json(response).await["code"], "INVALID_RANGE");
    }
}
