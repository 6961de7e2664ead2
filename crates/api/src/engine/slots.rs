//! Slot operations: bulk generation and capacity-aware CRUD.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use slotbook_core::error::CoreError;
use slotbook_core::planner::{self, HorizonPolicy};
use slotbook_core::types::DbId;
use slotbook_db::models::slot::{CreateTimeSlot, TimeSlot, UpdateTimeSlot};
use slotbook_db::repositories::{
    CapacityOutcome, DeleteOutcome, SlotRepo, TenantRepo,
};
use slotbook_events::SchedulingEvent;

use crate::error::{is_overlap_violation, AppError, AppResult};
use crate::response::GenerationSummary;
use crate::state::AppState;

/// Body for `POST /tenants/{tenant_id}/slots/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSlotsRequest {
    pub slot_duration_minutes: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Capacity applied to every generated slot. Defaults to 1.
    pub max_capacity: Option<i32>,
}

/// Body for `PUT /tenants/{tenant_id}/slots/{id}/capacity`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCapacityRequest {
    pub max_capacity: i32,
}

/// Bulk-generate slots over a date range from the tenant's week schedule.
///
/// Validates the range against the tenant's horizon policy, plans candidate
/// boundaries day by day, and inserts them in one idempotent batch. Re-runs
/// over an overlapping range skip existing boundaries instead of
/// duplicating them.
pub async fn generate(
    state: &AppState,
    tenant_id: DbId,
    req: &GenerateSlotsRequest,
) -> AppResult<GenerationSummary> {
    let settings = TenantRepo::get_settings(&state.pool, tenant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ScheduleSettings",
            id: tenant_id,
        }))?;

    let policy = HorizonPolicy {
        min_horizon_days: settings.min_horizon_days,
        max_horizon_days: settings.max_horizon_days,
    };
    planner::validate_generation_range(
        Utc::now().date_naive(),
        req.start_date,
        req.end_date,
        req.slot_duration_minutes,
        policy,
    )?;

    let max_capacity = req.max_capacity.unwrap_or(1);
    if max_capacity < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "max_capacity must be at least 1".into(),
        )));
    }

    let boundaries = planner::plan_range(
        &settings.week_schedule.0,
        req.start_date,
        req.end_date,
        req.slot_duration_minutes,
    );
    let candidates = boundaries.len() as u64;

    let created = SlotRepo::bulk_insert(&state.pool, tenant_id, &boundaries, max_capacity).await?;
    let summary = GenerationSummary {
        created,
        skipped: candidates - created,
    };

    tracing::info!(
        tenant_id,
        start_date = %req.start_date,
        end_date = %req.end_date,
        duration_minutes = req.slot_duration_minutes,
        created = summary.created,
        skipped = summary.skipped,
        "Slot generation run finished"
    );
    Ok(summary)
}

/// Create a single slot, surfacing overlaps as a typed conflict.
pub async fn create(
    state: &AppState,
    tenant_id: DbId,
    input: &CreateTimeSlot,
) -> AppResult<TimeSlot> {
    if input.start_time >= input.end_time {
        return Err(AppError::Core(CoreError::Validation(
            "start_time must be before end_time".into(),
        )));
    }
    if input.max_capacity.is_some_and(|c| c < 1) {
        return Err(AppError::Core(CoreError::Validation(
            "max_capacity must be at least 1".into(),
        )));
    }
    SlotRepo::create(&state.pool, tenant_id, input)
        .await
        .map_err(map_overlap)
}

/// Reschedule a slot's bounds, surfacing overlaps as a typed conflict.
///
/// The update is partial, so the bounds check runs against the merged
/// result of the request and the stored slot; the schema's CHECK
/// constraint remains the backstop.
pub async fn update_times(
    state: &AppState,
    tenant_id: DbId,
    id: DbId,
    input: &UpdateTimeSlot,
) -> AppResult<TimeSlot> {
    let current = SlotRepo::find_by_id(&state.pool, tenant_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TimeSlot",
            id,
        }))?;
    let start = input.start_time.unwrap_or(current.start_time);
    let end = input.end_time.unwrap_or(current.end_time);
    if start >= end {
        return Err(AppError::Core(CoreError::Validation(
            "start_time must be before end_time".into(),
        )));
    }

    let updated = SlotRepo::update_times(&state.pool, tenant_id, id, input)
        .await
        .map_err(map_overlap)?;
    updated.ok_or(AppError::Core(CoreError::NotFound {
        entity: "TimeSlot",
        id,
    }))
}

/// Delete a slot; refused while any seat is booked.
pub async fn delete(state: &AppState, tenant_id: DbId, id: DbId) -> AppResult<()> {
    match SlotRepo::delete(&state.pool, tenant_id, id).await? {
        DeleteOutcome::Deleted => Ok(()),
        DeleteOutcome::HasBookings(booked) => {
            Err(AppError::Core(CoreError::SlotHasBookings { booked }))
        }
        DeleteOutcome::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "TimeSlot",
            id,
        })),
    }
}

/// Block or unblock a slot. Blocking freezes new reservations only; booked
/// seats are untouched.
pub async fn set_blocked(
    state: &AppState,
    tenant_id: DbId,
    id: DbId,
    blocked: bool,
) -> AppResult<TimeSlot> {
    let slot = SlotRepo::set_blocked(&state.pool, tenant_id, id, blocked)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TimeSlot",
            id,
        }))?;
    state.event_bus.publish(
        SchedulingEvent::new(
            if blocked { "slot.blocked" } else { "slot.unblocked" },
            tenant_id,
        )
        .with_payload(serde_json::json!({ "slot_id": id })),
    );
    Ok(slot)
}

/// Change a slot's maximum capacity; refused below the booked count.
pub async fn set_capacity(
    state: &AppState,
    tenant_id: DbId,
    id: DbId,
    new_max: i32,
) -> AppResult<TimeSlot> {
    if new_max < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "max_capacity must be at least 1".into(),
        )));
    }
    match SlotRepo::set_capacity(&state.pool, tenant_id, id, new_max).await? {
        CapacityOutcome::Updated(slot) => Ok(slot),
        CapacityOutcome::BelowBooked { booked } => {
            Err(AppError::Core(CoreError::CapacityBelowBooked {
                requested: new_max,
                booked,
            }))
        }
        CapacityOutcome::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "TimeSlot",
            id,
        })),
    }
}

/// Turn the slot-overlap exclusion violation into its typed domain error;
/// pass every other database error through untouched.
fn map_overlap(err: sqlx::Error) -> AppError {
    if is_overlap_violation(&err) {
        AppError::Core(CoreError::OverlapConflict)
    } else {
        AppError::Database(err)
    }
}
