//! Route definitions.
//!
//! ```text
//! GET  /health                                           service health
//!
//! POST /tenants/{tenant_id}/slots/generate               bulk generation
//! GET  /tenants/{tenant_id}/slots                        list (window filter)
//! POST /tenants/{tenant_id}/slots                        create
//! GET  /tenants/{tenant_id}/slots/{id}                   get
//! PUT  /tenants/{tenant_id}/slots/{id}                   reschedule
//! DELETE /tenants/{tenant_id}/slots/{id}                 delete
//! POST /tenants/{tenant_id}/slots/{id}/block             block
//! POST /tenants/{tenant_id}/slots/{id}/unblock           unblock
//! PUT  /tenants/{tenant_id}/slots/{id}/capacity          change capacity
//! POST /tenants/{tenant_id}/slots/{id}/book              book this slot
//!
//! GET  /tenants/{tenant_id}/bookings                     list (status filter)
//! POST /tenants/{tenant_id}/bookings                     create
//! GET  /tenants/{tenant_id}/bookings/{id}                get
//! PUT  /tenants/{tenant_id}/bookings/{id}/status         lifecycle transition
//! PUT  /tenants/{tenant_id}/bookings/{id}/staff          assign/unassign staff
//!
//! GET  /tenants/{tenant_id}/schedule-settings            scheduling policy
//! PUT  /tenants/{tenant_id}/schedule-settings            update policy
//! ```

pub mod health;
pub mod tenants;

use axum::Router;

use crate::state::AppState;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/tenants/{tenant_id}", tenants::router())
}
