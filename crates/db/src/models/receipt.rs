//! Receipt model (written once per completed booking).

use serde::Serialize;
use slotbook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `receipts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Receipt {
    pub id: DbId,
    pub booking_id: DbId,
    pub tenant_id: DbId,
    pub amount_cents: i64,
    pub issued_at: Timestamp,
}
