//! Booking entity model and DTOs.

use serde::{Deserialize, Serialize};
use slotbook_core::lifecycle::BookingStatus;
use slotbook_core::types::{DbId, Timestamp};
use slotbook_core::CoreError;
use sqlx::FromRow;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub tenant_id: DbId,
    pub service_id: DbId,
    pub time_slot_id: DbId,
    pub customer_id: Option<DbId>,
    pub non_user_email: Option<String>,
    pub staff_id: Option<DbId>,
    pub status: BookingStatus,
    /// Price in minor currency units, captured from the service at
    /// creation time.
    pub price_cents: i64,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Who a booking is for: a registered customer or a guest email.
///
/// Exactly one of the two must be present; [`CustomerRef::validate`]
/// enforces this before any state is touched (the schema repeats the
/// check as a CHECK constraint).
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRef {
    pub customer_id: Option<DbId>,
    pub non_user_email: Option<String>,
}

impl CustomerRef {
    pub fn validate(&self) -> Result<(), CoreError> {
        match (self.customer_id, self.non_user_email.as_deref()) {
            (Some(_), None) => Ok(()),
            (None, Some(email)) if !email.trim().is_empty() => Ok(()),
            (None, Some(_)) => Err(CoreError::Validation(
                "non_user_email must not be empty".into(),
            )),
            (Some(_), Some(_)) => Err(CoreError::Validation(
                "provide either customer_id or non_user_email, not both".into(),
            )),
            (None, None) => Err(CoreError::Validation(
                "one of customer_id or non_user_email is required".into(),
            )),
        }
    }
}

/// DTO for creating a booking on a specific slot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub service_id: DbId,
    pub time_slot_id: DbId,
    #[serde(flatten)]
    pub customer: CustomerRef,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
}

/// Body for `POST /slots/{id}/book`; the slot id comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSlotRequest {
    pub service_id: DbId,
    #[serde(flatten)]
    pub customer: CustomerRef,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
}

/// Body for `PUT /bookings/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookingStatus {
    pub status: BookingStatus,
}

/// Body for `PUT /bookings/{id}/staff`; `staff_id: null` unassigns.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignStaff {
    pub staff_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn registered_customer_is_valid() {
        let customer = CustomerRef {
            customer_id: Some(5),
            non_user_email: None,
        };
        assert!(customer.validate().is_ok());
    }

    #[test]
    fn guest_email_is_valid() {
        let customer = CustomerRef {
            customer_id: None,
            non_user_email: Some("guest@example.com".into()),
        };
        assert!(customer.validate().is_ok());
    }

    #[test]
    fn both_identities_rejected() {
        let customer = CustomerRef {
            customer_id: Some(5),
            non_user_email: Some("guest@example.com".into()),
        };
        assert_matches!(customer.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn neither_identity_rejected() {
        let customer = CustomerRef {
            customer_id: None,
            non_user_email: None,
        };
        assert_matches!(customer.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_email_rejected() {
        let customer = CustomerRef {
            customer_id: None,
            non_user_email: Some("   ".into()),
        };
        assert_matches!(customer.validate(), Err(CoreError::Validation(_)));
    }
}
