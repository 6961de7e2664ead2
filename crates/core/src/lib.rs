//! Slotbook domain core.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the API server, and any future worker or CLI tooling.
//! It holds the pieces with real invariants: the booking status state
//! machine, working-hours schedules, and the slot boundary planner.

pub mod error;
pub mod lifecycle;
pub mod planner;
pub mod schedule;
pub mod types;

pub use error::CoreError;
pub use lifecycle::BookingStatus;
