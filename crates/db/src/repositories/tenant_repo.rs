//! Repository for the `tenants`, `tenant_members`, and
//! `tenant_schedule_settings` tables.

use sqlx::types::Json;
use sqlx::PgPool;

use slotbook_core::types::DbId;

use crate::models::tenant::{ScheduleSettings, TenantMember, UpdateScheduleSettings};

/// Column list for tenant_schedule_settings queries.
const SETTINGS_COLUMNS: &str = "tenant_id, auto_confirm_bookings, min_horizon_days, \
    max_horizon_days, week_schedule, updated_at";

/// Provides tenant and policy lookups.
pub struct TenantRepo;

impl TenantRepo {
    /// Look up a user's membership in a tenant.
    ///
    /// The tenant guard fails closed on `None`.
    pub async fn find_member(
        pool: &PgPool,
        user_id: DbId,
        tenant_id: DbId,
    ) -> Result<Option<TenantMember>, sqlx::Error> {
        sqlx::query_as::<_, TenantMember>(
            "SELECT user_id, tenant_id, role FROM tenant_members
             WHERE user_id = $1 AND tenant_id = $2",
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
    }

    /// Fetch a tenant's scheduling policy.
    pub async fn get_settings(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Option<ScheduleSettings>, sqlx::Error> {
        let query = format!(
            "SELECT {SETTINGS_COLUMNS} FROM tenant_schedule_settings WHERE tenant_id = $1"
        );
        sqlx::query_as::<_, ScheduleSettings>(&query)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a tenant's scheduling policy, returning the new
    /// row. Unset fields keep their value.
    pub async fn update_settings(
        pool: &PgPool,
        tenant_id: DbId,
        input: &UpdateScheduleSettings,
    ) -> Result<Option<ScheduleSettings>, sqlx::Error> {
        let query = format!(
            "UPDATE tenant_schedule_settings
             SET auto_confirm_bookings = COALESCE($2, auto_confirm_bookings),
                 min_horizon_days = COALESCE($3, min_horizon_days),
                 max_horizon_days = COALESCE($4, max_horizon_days),
                 week_schedule = COALESCE($5, week_schedule),
                 updated_at = now()
             WHERE tenant_id = $1
             RETURNING {SETTINGS_COLUMNS}"
        );
        sqlx::query_as::<_, ScheduleSettings>(&query)
            .bind(tenant_id)
            .bind(input.auto_confirm_bookings)
            .bind(input.min_horizon_days)
            .bind(input.max_horizon_days)
            .bind(input.week_schedule.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }
}
