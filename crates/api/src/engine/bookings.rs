//! Booking lifecycle engine.
//!
//! Creation couples the seat reservation and the booking insert in one
//! transaction; cancellation releases the seat in the same transaction as
//! the status write. Completion writes a receipt after commit -- receipt
//! failure never rolls back the completion.

use slotbook_core::error::CoreError;
use slotbook_core::lifecycle::{self, BookingStatus};
use slotbook_core::types::DbId;
use slotbook_db::models::booking::{Booking, CreateBooking};
use slotbook_db::repositories::{
    BookingRepo, NewBooking, ReceiptRepo, ReserveOutcome, ServiceRepo, SlotRepo, TenantRepo,
};
use slotbook_events::SchedulingEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Attempts to write a completion receipt before reporting it for
/// operator reconciliation.
const RECEIPT_RETRY_ATTEMPTS: u32 = 3;

/// Create a booking on a slot, reserving one seat atomically.
///
/// The conditional capacity increment and the booking insert either both
/// commit or neither does, so the system never holds a reserved seat with
/// no booking, nor a booking with no reserved seat.
pub async fn create(
    state: &AppState,
    tenant_id: DbId,
    actor: &AuthUser,
    input: &CreateBooking,
) -> AppResult<Booking> {
    input.customer.validate()?;

    let service = ServiceRepo::find_active(&state.pool, tenant_id, input.service_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id: input.service_id,
        }))?;

    let auto_confirm = TenantRepo::get_settings(&state.pool, tenant_id)
        .await?
        .map(|s| s.auto_confirm_bookings)
        .unwrap_or(false);
    let status = BookingStatus::initial(auto_confirm);

    let mut tx = state.pool.begin().await?;

    match SlotRepo::reserve(&mut tx, tenant_id, input.time_slot_id).await? {
        ReserveOutcome::Reserved(_) => {}
        ReserveOutcome::Full => return Err(AppError::Core(CoreError::SlotFull)),
        ReserveOutcome::Blocked => return Err(AppError::Core(CoreError::SlotBlocked)),
        ReserveOutcome::NotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "TimeSlot",
                id: input.time_slot_id,
            }))
        }
    }

    let booking = BookingRepo::insert(
        &mut tx,
        &NewBooking {
            tenant_id,
            service_id: service.id,
            time_slot_id: input.time_slot_id,
            customer_id: input.customer.customer_id,
            non_user_email: input.customer.non_user_email.clone(),
            status,
            // Captured now so later catalog price changes do not reprice
            // existing bookings.
            price_cents: service.price_cents,
            notes: input.notes.clone(),
            special_requests: input.special_requests.clone(),
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        tenant_id,
        booking_id = booking.id,
        slot_id = booking.time_slot_id,
        status = %booking.status,
        "Booking created"
    );
    state.event_bus.publish(
        SchedulingEvent::new("booking.created", tenant_id)
            .with_booking(booking.id)
            .with_actor(actor.user_id)
            .with_payload(serde_json::json!({ "status": booking.status })),
    );
    Ok(booking)
}

/// Apply a status transition through the central state machine.
///
/// Re-applying the booking's current status is an idempotent no-op, so a
/// retried cancellation neither fails nor releases capacity twice.
pub async fn update_status(
    state: &AppState,
    tenant_id: DbId,
    actor: &AuthUser,
    booking_id: DbId,
    target: BookingStatus,
) -> AppResult<Booking> {
    let booking = BookingRepo::find_by_id(&state.pool, tenant_id, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: booking_id,
        }))?;

    if booking.status == target {
        return Ok(booking);
    }
    lifecycle::validate_transition(booking.status, target)?;

    let updated = match target {
        BookingStatus::Cancelled => cancel(state, tenant_id, booking_id).await?,
        BookingStatus::Completed => complete(state, tenant_id, booking_id).await?,
        BookingStatus::Confirmed | BookingStatus::Pending => {
            transition(state, tenant_id, booking_id, target).await?
        }
    };

    let updated = match updated {
        Some(b) => b,
        // The conditional update lost a race with a concurrent transition;
        // re-read and report against the fresh status.
        None => {
            let current = BookingRepo::find_by_id(&state.pool, tenant_id, booking_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Booking",
                    id: booking_id,
                }))?;
            if current.status == target {
                return Ok(current);
            }
            return Err(AppError::Core(CoreError::InvalidTransition {
                from: current.status,
                to: target,
            }));
        }
    };

    tracing::info!(
        tenant_id,
        booking_id,
        status = %updated.status,
        "Booking status updated"
    );
    state.event_bus.publish(
        SchedulingEvent::new(format!("booking.{}", updated.status), tenant_id)
            .with_booking(booking_id)
            .with_actor(actor.user_id),
    );
    Ok(updated)
}

/// Plain status write guarded by the legal source states.
async fn transition(
    state: &AppState,
    tenant_id: DbId,
    booking_id: DbId,
    target: BookingStatus,
) -> AppResult<Option<Booking>> {
    let sources: Vec<BookingStatus> = [BookingStatus::Pending, BookingStatus::Confirmed]
        .into_iter()
        .filter(|&from| lifecycle::can_transition(from, target))
        .collect();
    let mut conn = state.pool.acquire().await?;
    Ok(BookingRepo::update_status_if(&mut conn, tenant_id, booking_id, &sources, target).await?)
}

/// Cancel: the status write and the capacity release commit together.
///
/// The conditional status update gates the release, so only the request
/// that actually flips the status returns the seat.
async fn cancel(
    state: &AppState,
    tenant_id: DbId,
    booking_id: DbId,
) -> AppResult<Option<Booking>> {
    let mut tx = state.pool.begin().await?;
    let cancelled = BookingRepo::update_status_if(
        &mut tx,
        tenant_id,
        booking_id,
        &[BookingStatus::Pending, BookingStatus::Confirmed],
        BookingStatus::Cancelled,
    )
    .await?;
    let Some(booking) = cancelled else {
        return Ok(None);
    };
    SlotRepo::release(&mut tx, tenant_id, booking.time_slot_id).await?;
    tx.commit().await?;
    Ok(Some(booking))
}

/// Complete: commit the status write, then issue the receipt.
async fn complete(
    state: &AppState,
    tenant_id: DbId,
    booking_id: DbId,
) -> AppResult<Option<Booking>> {
    let mut conn = state.pool.acquire().await?;
    let completed = BookingRepo::update_status_if(
        &mut conn,
        tenant_id,
        booking_id,
        &[BookingStatus::Pending, BookingStatus::Confirmed],
        BookingStatus::Completed,
    )
    .await?;
    drop(conn);
    let Some(booking) = completed else {
        return Ok(None);
    };

    issue_receipt(state, &booking).await;
    Ok(Some(booking))
}

/// Write the completion receipt with a bounded retry budget.
///
/// Exhaustion is reported for operator reconciliation; the completed
/// status stands regardless.
async fn issue_receipt(state: &AppState, booking: &Booking) {
    for attempt in 1..=RECEIPT_RETRY_ATTEMPTS {
        match ReceiptRepo::create_for_booking(
            &state.pool,
            booking.tenant_id,
            booking.id,
            booking.price_cents,
        )
        .await
        {
            Ok(Some(receipt)) => {
                tracing::info!(
                    tenant_id = booking.tenant_id,
                    booking_id = booking.id,
                    receipt_id = receipt.id,
                    "Receipt issued"
                );
                return;
            }
            // A previous attempt (or request) already issued it.
            Ok(None) => return,
            Err(e) if attempt < RECEIPT_RETRY_ATTEMPTS => {
                tracing::warn!(
                    booking_id = booking.id,
                    attempt,
                    error = %e,
                    "Receipt write failed; retrying"
                );
            }
            Err(e) => {
                tracing::error!(
                    tenant_id = booking.tenant_id,
                    booking_id = booking.id,
                    error = %e,
                    "Receipt write exhausted retries; booking completed without receipt, reconcile manually"
                );
            }
        }
    }
}

/// Assign, overwrite, or clear (`staff_id: null`) the staff member on an
/// active booking.
pub async fn assign_staff(
    state: &AppState,
    tenant_id: DbId,
    actor: &AuthUser,
    booking_id: DbId,
    staff_id: Option<DbId>,
) -> AppResult<Booking> {
    let updated =
        BookingRepo::set_staff_if_active(&state.pool, tenant_id, booking_id, staff_id).await?;
    let booking = match updated {
        Some(b) => b,
        None => {
            let current = BookingRepo::find_by_id(&state.pool, tenant_id, booking_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Booking",
                    id: booking_id,
                }))?;
            return Err(AppError::Core(CoreError::InvalidState(format!(
                "staff can only be assigned while a booking is pending or confirmed; \
                 this booking is {}",
                current.status
            ))));
        }
    };

    state.event_bus.publish(
        SchedulingEvent::new(
            if staff_id.is_some() {
                "booking.staff_assigned"
            } else {
                "booking.staff_unassigned"
            },
            tenant_id,
        )
        .with_booking(booking_id)
        .with_actor(actor.user_id)
        .with_payload(serde_json::json!({ "staff_id": staff_id })),
    );
    Ok(booking)
}
