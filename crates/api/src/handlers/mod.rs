//! Request handlers.
//!
//! Handlers authorize the tenant scope via [`TenantGuard`], delegate to the
//! engine or repositories, and map errors via `AppError`.
//!
//! [`TenantGuard`]: crate::middleware::TenantGuard

pub mod bookings;
pub mod schedule_settings;
pub mod slots;
