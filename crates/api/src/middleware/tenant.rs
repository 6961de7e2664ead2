//! Tenant authorization guard.
//!
//! Every tenant-scoped operation calls [`TenantGuard::authorize`] before
//! touching any store. The guard is the only place that bridges a caller's
//! identity to a tenant scope; repositories additionally filter every query
//! by the authorized `tenant_id` so a foreign resource id behaves as not
//! found rather than leaking its owner.

use slotbook_core::error::CoreError;
use slotbook_core::types::DbId;
use slotbook_db::repositories::TenantRepo;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Proof that the caller may act within a tenant scope.
///
/// Constructed exclusively by [`TenantGuard::authorize`]; handlers pass the
/// contained `tenant_id` down to the engine and repositories.
#[derive(Debug, Clone, Copy)]
pub struct TenantGuard {
    pub tenant_id: DbId,
}

impl TenantGuard {
    /// Authorize `user` for the tenant scope named in the request path.
    ///
    /// Fails closed with `CrossTenantAccessDenied` when the session's
    /// tenant claim does not match the requested scope -- without touching
    /// the database -- and when the membership backing the claim no longer
    /// exists. The error never narrows, widens, or names the owning tenant.
    pub async fn authorize(
        state: &AppState,
        user: &AuthUser,
        requested_tenant_id: DbId,
    ) -> Result<Self, AppError> {
        if user.tenant_id != requested_tenant_id {
            tracing::warn!(
                user_id = user.user_id,
                requested_tenant_id,
                "Cross-tenant access attempt denied"
            );
            return Err(AppError::Core(CoreError::CrossTenantAccessDenied));
        }

        // The claim may outlive the membership (revoked staff); re-check.
        let member = TenantRepo::find_member(&state.pool, user.user_id, requested_tenant_id)
            .await?;
        if member.is_none() {
            tracing::warn!(
                user_id = user.user_id,
                requested_tenant_id,
                "Tenant membership no longer present; access denied"
            );
            return Err(AppError::Core(CoreError::CrossTenantAccessDenied));
        }

        Ok(Self {
            tenant_id: requested_tenant_id,
        })
    }
}
