//! Service catalog model (lookup only; catalog CRUD is out of scope).

use serde::Serialize;
use slotbook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub tenant_id: DbId,
    pub name: String,
    /// Price in minor currency units.
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
