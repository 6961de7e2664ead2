//! Handlers for the `/tenants/{tenant_id}/slots` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use slotbook_core::types::{DbId, Timestamp};
use slotbook_db::models::slot::{CreateTimeSlot, TimeSlot, UpdateTimeSlot};
use slotbook_db::repositories::SlotRepo;

use crate::engine::slots as engine;
use crate::engine::slots::{GenerateSlotsRequest, UpdateCapacityRequest};
use crate::error::{AppError, AppResult};
use crate::middleware::{AuthUser, TenantGuard};
use crate::response::GenerationSummary;
use crate::state::AppState;

/// Window filter for slot listing.
#[derive(Debug, Deserialize)]
pub struct SlotListQuery {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

/// POST /api/v1/tenants/{tenant_id}/slots/generate
pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tenant_id): Path<DbId>,
    Json(input): Json<GenerateSlotsRequest>,
) -> AppResult<Json<GenerationSummary>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let summary = engine::generate(&state, guard.tenant_id, &input).await?;
    Ok(Json(summary))
}

/// POST /api/v1/tenants/{tenant_id}/slots
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tenant_id): Path<DbId>,
    Json(input): Json<CreateTimeSlot>,
) -> AppResult<(StatusCode, Json<TimeSlot>)> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let slot = engine::create(&state, guard.tenant_id, &input).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

/// GET /api/v1/tenants/{tenant_id}/slots
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tenant_id): Path<DbId>,
    Query(query): Query<SlotListQuery>,
) -> AppResult<Json<Vec<TimeSlot>>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let slots = SlotRepo::list(&state.pool, guard.tenant_id, query.from, query.to).await?;
    Ok(Json(slots))
}

/// GET /api/v1/tenants/{tenant_id}/slots/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path((tenant_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TimeSlot>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let slot = SlotRepo::find_by_id(&state.pool, guard.tenant_id, id)
        .await?
        .ok_or(AppError::Core(slotbook_core::CoreError::NotFound {
            entity: "TimeSlot",
            id,
        }))?;
    Ok(Json(slot))
}

/// PUT /api/v1/tenants/{tenant_id}/slots/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((tenant_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTimeSlot>,
) -> AppResult<Json<TimeSlot>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let slot = engine::update_times(&state, guard.tenant_id, id, &input).await?;
    Ok(Json(slot))
}

/// DELETE /api/v1/tenants/{tenant_id}/slots/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((tenant_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    engine::delete(&state, guard.tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/tenants/{tenant_id}/slots/{id}/block
pub async fn block(
    State(state): State<AppState>,
    user: AuthUser,
    Path((tenant_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TimeSlot>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let slot = engine::set_blocked(&state, guard.tenant_id, id, true).await?;
    Ok(Json(slot))
}

/// POST /api/v1/tenants/{tenant_id}/slots/{id}/unblock
pub async fn unblock(
    State(state): State<AppState>,
    user: AuthUser,
    Path((tenant_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TimeSlot>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let slot = engine::set_blocked(&state, guard.tenant_id, id, false).await?;
    Ok(Json(slot))
}

/// PUT /api/v1/tenants/{tenant_id}/slots/{id}/capacity
pub async fn update_capacity(
    State(state): State<AppState>,
    user: AuthUser,
    Path((tenant_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCapacityRequest>,
) -> AppResult<Json<TimeSlot>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let slot = engine::set_capacity(&state, guard.tenant_id, id, input.max_capacity).await?;
    Ok(Json(slot))
}
