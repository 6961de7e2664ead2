//! Scheduling engine.
//!
//! Orchestration that spans more than one repository call: bulk slot
//! generation, and the booking lifecycle with its transactional capacity
//! accounting. Handlers stay thin and delegate here.

pub mod bookings;
pub mod slots;
