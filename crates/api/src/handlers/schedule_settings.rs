//! Handlers for a tenant's scheduling policy
//! (`/tenants/{tenant_id}/schedule-settings`).

use axum::extract::{Path, State};
use axum::Json;
use slotbook_core::types::DbId;
use slotbook_db::models::tenant::{ScheduleSettings, UpdateScheduleSettings};
use slotbook_db::repositories::TenantRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::{AuthUser, TenantGuard};
use crate::state::AppState;

/// GET /api/v1/tenants/{tenant_id}/schedule-settings
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tenant_id): Path<DbId>,
) -> AppResult<Json<ScheduleSettings>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    let settings = TenantRepo::get_settings(&state.pool, guard.tenant_id)
        .await?
        .ok_or(AppError::Core(slotbook_core::CoreError::NotFound {
            entity: "ScheduleSettings",
            id: tenant_id,
        }))?;
    Ok(Json(settings))
}

/// PUT /api/v1/tenants/{tenant_id}/schedule-settings
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(tenant_id): Path<DbId>,
    Json(input): Json<UpdateScheduleSettings>,
) -> AppResult<Json<ScheduleSettings>> {
    let guard = TenantGuard::authorize(&state, &user, tenant_id).await?;
    if let Some(schedule) = &input.week_schedule {
        schedule.validate()?;
    }
    // The update is partial, so the horizon window is checked against the
    // merged result of the request and the stored settings.
    if input.min_horizon_days.is_some() || input.max_horizon_days.is_some() {
        let current = TenantRepo::get_settings(&state.pool, guard.tenant_id)
            .await?
            .ok_or(AppError::Core(slotbook_core::CoreError::NotFound {
                entity: "ScheduleSettings",
                id: tenant_id,
            }))?;
        let min = input.min_horizon_days.unwrap_or(current.min_horizon_days);
        let max = input.max_horizon_days.unwrap_or(current.max_horizon_days);
        if min > max {
            return Err(AppError::Core(slotbook_core::CoreError::Validation(
                "min_horizon_days must not exceed max_horizon_days".into(),
            )));
        }
    }
    let settings = TenantRepo::update_settings(&state.pool, guard.tenant_id, &input)
        .await?
        .ok_or(AppError::Core(slotbook_core::CoreError::NotFound {
            entity: "ScheduleSettings",
            id: tenant_id,
        }))?;
    Ok(Json(settings))
}
