//! Tenant entity and scheduling policy models.

use serde::{Deserialize, Serialize};
use slotbook_core::schedule::WeekSchedule;
use slotbook_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `tenants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tenant {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `tenant_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TenantMember {
    pub user_id: DbId,
    pub tenant_id: DbId,
    pub role: String,
}

/// A row from the `tenant_schedule_settings` table.
///
/// Drives slot generation (horizon window, working hours) and the
/// auto-confirm booking policy.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleSettings {
    pub tenant_id: DbId,
    pub auto_confirm_bookings: bool,
    pub min_horizon_days: i32,
    pub max_horizon_days: i32,
    pub week_schedule: Json<WeekSchedule>,
    pub updated_at: Timestamp,
}

/// DTO for replacing a tenant's schedule settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScheduleSettings {
    pub auto_confirm_bookings: Option<bool>,
    pub min_horizon_days: Option<i32>,
    pub max_horizon_days: Option<i32>,
    pub week_schedule: Option<WeekSchedule>,
}
