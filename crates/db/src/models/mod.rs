//! Row models and request/update DTOs.

pub mod booking;
pub mod receipt;
pub mod service;
pub mod slot;
pub mod tenant;
