//! Request middleware: authentication and tenant scoping.

pub mod auth;
pub mod tenant;

pub use auth::AuthUser;
pub use tenant::TenantGuard;
