//! Repository for the `receipts` table.

use sqlx::PgPool;

use slotbook_core::types::DbId;

use crate::models::receipt::Receipt;

/// Column list for receipts queries.
const RECEIPT_COLUMNS: &str = "id, booking_id, tenant_id, amount_cents, issued_at";

/// Provides persistence for completion receipts.
pub struct ReceiptRepo;

impl ReceiptRepo {
    /// Write the receipt for a completed booking.
    ///
    /// `ON CONFLICT DO NOTHING` on the unique booking id keeps the receipt
    /// exactly-once under retries; `None` means one already existed.
    pub async fn create_for_booking(
        pool: &PgPool,
        tenant_id: DbId,
        booking_id: DbId,
        amount_cents: i64,
    ) -> Result<Option<Receipt>, sqlx::Error> {
        let query = format!(
            "INSERT INTO receipts (booking_id, tenant_id, amount_cents)
             VALUES ($1, $2, $3)
             ON CONFLICT (booking_id) DO NOTHING
             RETURNING {RECEIPT_COLUMNS}"
        );
        sqlx::query_as::<_, Receipt>(&query)
            .bind(booking_id)
            .bind(tenant_id)
            .bind(amount_cents)
            .fetch_optional(pool)
            .await
    }

    /// Find the receipt for a booking, if issued.
    pub async fn find_by_booking(
        pool: &PgPool,
        tenant_id: DbId,
        booking_id: DbId,
    ) -> Result<Option<Receipt>, sqlx::Error> {
        let query = format!(
            "SELECT {RECEIPT_COLUMNS} FROM receipts
             WHERE booking_id = $1 AND tenant_id = $2"
        );
        sqlx::query_as::<_, Receipt>(&query)
            .bind(booking_id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }
}
