//! Read access to the service catalog.
//!
//! The catalog itself is maintained elsewhere; the scheduling core only
//! resolves `service_id -> price, duration` at booking-creation time.

use sqlx::PgPool;

use slotbook_core::types::DbId;

use crate::models::service::Service;

/// Column list for services queries.
const SERVICE_COLUMNS: &str =
    "id, tenant_id, name, price_cents, duration_minutes, active, created_at, updated_at";

/// Provides service lookups for booking creation.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Find an active service belonging to the tenant.
    pub async fn find_active(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {SERVICE_COLUMNS} FROM services
             WHERE id = $1 AND tenant_id = $2 AND active = TRUE"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }
}
