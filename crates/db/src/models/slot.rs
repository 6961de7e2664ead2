//! Time slot entity model and DTOs.

use serde::{Deserialize, Serialize};
use slotbook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `time_slots` table.
///
/// Invariants held by the schema: `start_time < end_time`,
/// `0 <= booked_count <= max_capacity`, and no two slots of the same
/// tenant overlap.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeSlot {
    pub id: DbId,
    pub tenant_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub max_capacity: i32,
    pub booked_count: i32,
    pub is_blocked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TimeSlot {
    /// Seats still available for new reservations.
    pub fn remaining_capacity(&self) -> i32 {
        self.max_capacity - self.booked_count
    }
}

/// DTO for creating a single slot manually.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeSlot {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Defaults to 1 if omitted.
    pub max_capacity: Option<i32>,
}

/// DTO for rescheduling an existing slot. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTimeSlot {
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}
