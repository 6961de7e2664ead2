//! Tenant-scoped routes: slots, bookings, and scheduling policy.
//!
//! Mounted at `/tenants/{tenant_id}`; every handler authorizes the path's
//! tenant scope through the tenant guard before touching a store.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{bookings, schedule_settings, slots};
use crate::state::AppState;

/// Routes mounted at `/tenants/{tenant_id}`.
pub fn router() -> Router<AppState> {
    let slot_routes = Router::new()
        .route("/", get(slots::list).post(slots::create))
        .route("/generate", post(slots::generate))
        .route(
            "/{id}",
            get(slots::get_by_id).put(slots::update).delete(slots::delete),
        )
        .route("/{id}/block", post(slots::block))
        .route("/{id}/unblock", post(slots::unblock))
        .route("/{id}/capacity", put(slots::update_capacity))
        .route("/{id}/book", post(bookings::book_slot));

    let booking_routes = Router::new()
        .route("/", get(bookings::list).post(bookings::create))
        .route("/{id}", get(bookings::get_by_id))
        .route("/{id}/status", put(bookings::update_status))
        .route("/{id}/staff", put(bookings::assign_staff));

    let settings_routes = Router::new().route(
        "/",
        get(schedule_settings::get).put(schedule_settings::update),
    );

    Router::new()
        .nest("/slots", slot_routes)
        .nest("/bookings", booking_routes)
        .nest("/schedule-settings", settings_routes)
}
