//! Repository for the `bookings` table.
//!
//! Status changes are conditional updates (`WHERE status = ANY(...)`) so a
//! transition only lands when the booking is still in an expected state;
//! the lifecycle engine relies on this to keep cancellation idempotent and
//! terminal states closed under concurrency.

use sqlx::{PgConnection, PgPool};

use slotbook_core::lifecycle::BookingStatus;
use slotbook_core::types::DbId;

use crate::models::booking::Booking;

/// Column list for bookings queries.
const BOOKING_COLUMNS: &str = "id, tenant_id, service_id, time_slot_id, customer_id, \
    non_user_email, staff_id, status, price_cents, notes, special_requests, \
    created_at, updated_at";

/// Fields for inserting a booking; assembled by the lifecycle engine after
/// validation and price capture.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub tenant_id: DbId,
    pub service_id: DbId,
    pub time_slot_id: DbId,
    pub customer_id: Option<DbId>,
    pub non_user_email: Option<String>,
    pub status: BookingStatus,
    pub price_cents: i64,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
}

/// Provides persistence for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a booking, returning the created row.
    ///
    /// Takes a connection so the caller can couple the insert with the
    /// slot's capacity reservation in one transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &NewBooking,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings
                (tenant_id, service_id, time_slot_id, customer_id, non_user_email,
                 status, price_cents, notes, special_requests)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {BOOKING_COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.tenant_id)
            .bind(input.service_id)
            .bind(input.time_slot_id)
            .bind(input.customer_id)
            .bind(&input.non_user_email)
            .bind(input.status)
            .bind(input.price_cents)
            .bind(&input.notes)
            .bind(&input.special_requests)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a booking by id within the tenant scope.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1 AND tenant_id = $2"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's bookings, optionally filtered by status, newest
    /// first.
    pub async fn list(
        pool: &PgPool,
        tenant_id: DbId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE tenant_id = $1
               AND ($2::booking_status IS NULL OR status = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(tenant_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Move a booking to `to` only while its status is one of `from`.
    ///
    /// Returns `None` when the booking does not exist for this tenant or is
    /// no longer in an accepted state; the caller re-reads to distinguish.
    pub async fn update_status_if(
        conn: &mut PgConnection,
        tenant_id: DbId,
        id: DbId,
        from: &[BookingStatus],
        to: BookingStatus,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings
             SET status = $3, updated_at = now()
             WHERE id = $1 AND tenant_id = $2 AND status = ANY($4)
             RETURNING {BOOKING_COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(to)
            .bind(from)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Assign or clear the staff member, only while the booking is still
    /// active (`pending` or `confirmed`). Overwriting is allowed and the
    /// status is untouched.
    pub async fn set_staff_if_active(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        staff_id: Option<DbId>,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings
             SET staff_id = $3, updated_at = now()
             WHERE id = $1 AND tenant_id = $2
               AND status IN ('pending', 'confirmed')
             RETURNING {BOOKING_COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(staff_id)
            .fetch_optional(pool)
            .await
    }
}
