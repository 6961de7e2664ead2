//! Handlers for the `/tenants/{tenant_id}/bookings` resource and the
//! slot-centric booking alias.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use slotbook_core::lifecycle::BookingStatus;
use slotbook_core::types::DbId;
use slotbook_db::models::booking::{
    AssignStaff, BookSlotRequest, Booking, CreateBooking, UpdateBookingStatus,
};
use slotbook_db::repositories::BookingRepo;

use crate::engine::bookings as engine;
use crate::error::{AppError, AppResult};
use crate::middleware::{AuthUser, TenantGuard};
use crate::state::AppState;

/// Status filter for booking listing.
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
}

/// POST /api/v1/tenants/{tenant_id}/bookings
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tenant_id): Path<DbId>,
    Json(input): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let booking = engine::create(&state, guard.tenant_id, &user, &input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// POST /api/v1/tenants/{tenant_id}/slots/{slot_id}/book
///
/// Slot-centric alias: fills `time_slot_id` from the URL path and delegates
/// to the same lifecycle entry point as booking creation.
pub async fn book_slot(
    State(state): State<AppState>,
    user: AuthUser,
    Path((tenant_id, slot_id)): Path<(DbId, DbId)>,
    Json(input): Json<BookSlotRequest>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let create = CreateBooking {
        service_id: input.service_id,
        time_slot_id: slot_id,
        customer: input.customer,
        notes: input.notes,
        special_requests: input.special_requests,
    };
    let booking = engine::create(&state, guard.tenant_id, &user, &create).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/v1/tenants/{tenant_id}/bookings
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tenant_id): Path<DbId>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let bookings = BookingRepo::list(&state.pool, guard.tenant_id, query.status).await?;
    Ok(Json(bookings))
}

/// GET /api/v1/tenants/{tenant_id}/bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path((tenant_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Booking>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let booking = BookingRepo::find_by_id(&state.pool, guard.tenant_id, id)
        .await?
        .ok_or(AppError::Core(slotbook_core::CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    Ok(Json(booking))
}

/// PUT /api/v1/tenants/{tenant_id}/bookings/{id}/status
///
/// Cancellation through this endpoint is the unbooking operation: it
/// releases the reserved seat and tolerates retries.
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path((tenant_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateBookingStatus>,
) -> AppResult<Json<Booking>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let booking = engine::update_status(&state, guard.tenant_id, &user, id, input.status).await?;
    Ok(Json(booking))
}

/// PUT /api/v1/tenants/{tenant_id}/bookings/{id}/staff
pub async fn assign_staff(
    State(state): State<AppState>,
    user: AuthUser,
    Path((tenant_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<AssignStaff>,
) -> AppResult<Json<Booking>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let booking =
        engine::assign_staff(&state, guard.tenant_id, &user, id, input.staff_id).await?;
    Ok(Json(booking))
}
