//! Repositories: all SQL for the scheduling core.

pub mod booking_repo;
pub mod receipt_repo;
pub mod service_repo;
pub mod slot_repo;
pub mod tenant_repo;

pub use booking_repo::{BookingRepo, NewBooking};
pub use receipt_repo::ReceiptRepo;
pub use service_repo::ServiceRepo;
pub use slot_repo::{CapacityOutcome, DeleteOutcome, ReserveOutcome, SlotRepo};
pub use tenant_repo::TenantRepo;
