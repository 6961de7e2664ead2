use crate::lifecycle::BookingStatus;
use crate::types::DbId;

/// Domain error taxonomy shared by the repository and API layers.
///
/// Conflict variants (`OverlapConflict`, `SlotFull`, `SlotBlocked`,
/// `CapacityBelowBooked`, `SlotHasBookings`) describe legitimate concurrent
/// or policy conflicts and are returned as typed results for the caller to
/// act on; they are never retried internally.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The requested generation range falls outside the tenant's horizon
    /// window, or the range itself is malformed.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The slot would overlap an existing slot of the same tenant.
    #[error("Slot overlaps an existing slot for this tenant")]
    OverlapConflict,

    /// Every seat of the slot is already booked.
    #[error("Slot is fully booked")]
    SlotFull,

    /// The slot is blocked and accepts no new reservations.
    #[error("Slot is blocked")]
    SlotBlocked,

    /// A capacity change would drop the maximum below the seats already
    /// booked.
    #[error("New capacity {requested} is below the booked count {booked}")]
    CapacityBelowBooked { requested: i32, booked: i32 },

    /// The slot still has booked seats and cannot be deleted.
    #[error("Slot has {booked} active booking(s) and cannot be deleted")]
    SlotHasBookings { booked: i32 },

    /// The requested booking status change is not a legal transition.
    #[error("Invalid booking transition: {from} -> {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// The booking is in a state that does not permit the operation
    /// (e.g. staff assignment on a terminal booking).
    #[error("Invalid booking state: {0}")]
    InvalidState(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller's tenant does not match the tenant scope of the request.
    /// The message never names the tenant that owns the resource.
    #[error("Access to the requested tenant is denied")]
    CrossTenantAccessDenied,

    #[error("Internal error: {0}")]
    Internal(String),
}
