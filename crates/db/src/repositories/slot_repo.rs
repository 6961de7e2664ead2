//! Repository for the `time_slots` table, including the capacity ledger.
//!
//! Capacity changes are single atomic conditional updates ("increment iff
//! below capacity"), never a read-modify-write pair, so two concurrent
//! reservations for the last seat cannot both succeed. Overlap rejection
//! and generation idempotence ride on the table's exclusion and unique
//! constraints.

use sqlx::{PgConnection, PgPool};

use slotbook_core::planner::SlotBoundary;
use slotbook_core::types::{DbId, Timestamp};

use crate::models::slot::{CreateTimeSlot, TimeSlot, UpdateTimeSlot};

/// Column list for time_slots queries.
const SLOT_COLUMNS: &str = "id, tenant_id, start_time, end_time, max_capacity, booked_count, \
    is_blocked, created_at, updated_at";

/// Result of a seat reservation attempt.
#[derive(Debug)]
pub enum ReserveOutcome {
    /// A seat was reserved; the returned slot reflects the new count.
    Reserved(TimeSlot),
    /// Every seat is taken.
    Full,
    /// The slot is blocked for new reservations.
    Blocked,
    /// No such slot for this tenant.
    NotFound,
}

/// Result of a slot deletion attempt.
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    /// The slot still has this many booked seats.
    HasBookings(i32),
    NotFound,
}

/// Result of a capacity change attempt.
#[derive(Debug)]
pub enum CapacityOutcome {
    Updated(TimeSlot),
    /// The requested maximum is below the current booked count.
    BelowBooked { booked: i32 },
    NotFound,
}

/// Provides persistence for time slots.
pub struct SlotRepo;

impl SlotRepo {
    /// Insert a single slot, returning the created row.
    ///
    /// An overlap with an existing slot of the same tenant surfaces as a
    /// database error carrying the `ex_time_slots_no_overlap` constraint.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateTimeSlot,
    ) -> Result<TimeSlot, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_slots (tenant_id, start_time, end_time, max_capacity)
             VALUES ($1, $2, $3, $4)
             RETURNING {SLOT_COLUMNS}"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(tenant_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.max_capacity.unwrap_or(1))
            .fetch_one(pool)
            .await
    }

    /// Bulk-insert generated slot boundaries for a tenant.
    ///
    /// `ON CONFLICT DO NOTHING` lets the unique and exclusion constraints
    /// absorb duplicates from re-runs and concurrent generation; the
    /// returned count is the number of rows actually inserted. Existing
    /// slots are never mutated.
    pub async fn bulk_insert(
        pool: &PgPool,
        tenant_id: DbId,
        boundaries: &[SlotBoundary],
        max_capacity: i32,
    ) -> Result<u64, sqlx::Error> {
        if boundaries.is_empty() {
            return Ok(0);
        }
        let starts: Vec<Timestamp> = boundaries.iter().map(|b| b.start).collect();
        let ends: Vec<Timestamp> = boundaries.iter().map(|b| b.end).collect();

        let result = sqlx::query(
            "INSERT INTO time_slots (tenant_id, start_time, end_time, max_capacity)
             SELECT $1, bounds.start_time, bounds.end_time, $4
             FROM UNNEST($2::timestamptz[], $3::timestamptz[])
                 AS bounds(start_time, end_time)
             ON CONFLICT DO NOTHING",
        )
        .bind(tenant_id)
        .bind(&starts)
        .bind(&ends)
        .bind(max_capacity)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Find a slot by id within the tenant scope.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<TimeSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {SLOT_COLUMNS} FROM time_slots WHERE id = $1 AND tenant_id = $2"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's slots, optionally limited to a start-time window,
    /// ordered chronologically.
    pub async fn list(
        pool: &PgPool,
        tenant_id: DbId,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<TimeSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {SLOT_COLUMNS} FROM time_slots
             WHERE tenant_id = $1
               AND ($2::timestamptz IS NULL OR start_time >= $2)
               AND ($3::timestamptz IS NULL OR start_time < $3)
             ORDER BY start_time ASC"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(tenant_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Reschedule a slot's bounds. Unchanged fields keep their value.
    ///
    /// Overlaps surface as an exclusion-constraint error, same as
    /// [`create`](Self::create).
    pub async fn update_times(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        input: &UpdateTimeSlot,
    ) -> Result<Option<TimeSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE time_slots
             SET start_time = COALESCE($3, start_time),
                 end_time = COALESCE($4, end_time),
                 updated_at = now()
             WHERE id = $1 AND tenant_id = $2
             RETURNING {SLOT_COLUMNS}"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .fetch_optional(pool)
            .await
    }

    /// Delete a slot, but only while it has no booked seats.
    pub async fn delete(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<DeleteOutcome, sqlx::Error> {
        let deleted = sqlx::query(
            "DELETE FROM time_slots
             WHERE id = $1 AND tenant_id = $2 AND booked_count = 0",
        )
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
        if deleted.rows_affected() > 0 {
            return Ok(DeleteOutcome::Deleted);
        }
        match Self::find_by_id(pool, tenant_id, id).await? {
            Some(slot) => Ok(DeleteOutcome::HasBookings(slot.booked_count)),
            None => Ok(DeleteOutcome::NotFound),
        }
    }

    // -----------------------------------------------------------------------
    // Capacity ledger
    // -----------------------------------------------------------------------

    /// Reserve one seat, atomically.
    ///
    /// The conditional update succeeds only while the slot is unblocked and
    /// below capacity; on zero rows a follow-up read classifies the refusal.
    /// Takes a connection so the caller can couple the reservation with the
    /// booking insert in one transaction.
    pub async fn reserve(
        conn: &mut PgConnection,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<ReserveOutcome, sqlx::Error> {
        let query = format!(
            "UPDATE time_slots
             SET booked_count = booked_count + 1, updated_at = now()
             WHERE id = $1 AND tenant_id = $2
               AND is_blocked = FALSE
               AND booked_count < max_capacity
             RETURNING {SLOT_COLUMNS}"
        );
        let reserved = sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&mut *conn)
            .await?;
        if let Some(slot) = reserved {
            return Ok(ReserveOutcome::Reserved(slot));
        }

        let existing = sqlx::query_as::<_, TimeSlot>(&format!(
            "SELECT {SLOT_COLUMNS} FROM time_slots WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(match existing {
            None => ReserveOutcome::NotFound,
            Some(slot) if slot.is_blocked => ReserveOutcome::Blocked,
            Some(_) => ReserveOutcome::Full,
        })
    }

    /// Release one seat, floored at zero.
    ///
    /// Releasing an already-empty slot is a no-op so client retries and
    /// repeated cancellations stay harmless.
    pub async fn release(
        conn: &mut PgConnection,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<TimeSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE time_slots
             SET booked_count = GREATEST(booked_count - 1, 0), updated_at = now()
             WHERE id = $1 AND tenant_id = $2
             RETURNING {SLOT_COLUMNS}"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Set or clear the blocked flag.
    ///
    /// Blocking only freezes new reservations; seats already booked stay
    /// booked.
    pub async fn set_blocked(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        blocked: bool,
    ) -> Result<Option<TimeSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE time_slots
             SET is_blocked = $3, updated_at = now()
             WHERE id = $1 AND tenant_id = $2
             RETURNING {SLOT_COLUMNS}"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(blocked)
            .fetch_optional(pool)
            .await
    }

    /// Change the maximum capacity, refusing to drop below the booked count.
    pub async fn set_capacity(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        new_max: i32,
    ) -> Result<CapacityOutcome, sqlx::Error> {
        let query = format!(
            "UPDATE time_slots
             SET max_capacity = $3, updated_at = now()
             WHERE id = $1 AND tenant_id = $2 AND booked_count <= $3
             RETURNING {SLOT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(new_max)
            .fetch_optional(pool)
            .await?;
        if let Some(slot) = updated {
            return Ok(CapacityOutcome::Updated(slot));
        }
        match Self::find_by_id(pool, tenant_id, id).await? {
            Some(slot) => Ok(CapacityOutcome::BelowBooked {
                booked: slot.booked_count,
            }),
            None => Ok(CapacityOutcome::NotFound),
        }
    }
}
