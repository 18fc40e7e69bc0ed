//! Domain types for Wayfare.
//!
//! Value objects shared across the booking flow, catalog, and social
//! features: newtype identifiers, `Money` in whole rupees, and the contact
//! detail structs the booking wizard collects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random id
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing `Uuid`
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the inner UUID
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id! {
    /// Unique identifier for a trip
    TripId
}

uuid_id! {
    /// Unique identifier for a stay
    StayId
}

uuid_id! {
    /// Unique identifier for a booking
    BookingId
}

uuid_id! {
    /// Unique identifier for a user
    UserId
}

uuid_id! {
    /// Unique identifier for a memory card
    MemoryId
}

uuid_id! {
    /// Unique identifier for a comment
    CommentId
}

uuid_id! {
    /// Unique identifier for a lead
    LeadId
}

// ============================================================================
// Money
// ============================================================================

/// Money in whole rupees.
///
/// Catalog prices are integer rupees; there are no paise, no rounding rules,
/// no taxes, and no proration anywhere in the product, so the representation
/// is a plain unsigned count with checked arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero rupees
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from whole rupees
    #[must_use]
    pub const fn from_rupees(rupees: u64) -> Self {
        Self(rupees)
    }

    /// Returns the amount in whole rupees
    #[must_use]
    pub const fn rupees(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two money amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Multiplies money by a quantity with overflow checking
    #[must_use]
    pub const fn checked_multiply(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as u64) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

// ============================================================================
// Products
// ============================================================================

/// The two bookable product types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Multi-night stay
    Stay,
    /// Dated group trip
    Trip,
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stay => write!(f, "stay"),
            Self::Trip => write!(f, "trip"),
        }
    }
}

// ============================================================================
// Contact details
// ============================================================================

/// Traveller contact details collected in the booking wizard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
}

impl ContactDetails {
    /// All required fields are non-empty after trimming.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.phone.trim().is_empty()
    }
}

/// Emergency contact, required for trip bookings only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    /// Contact name
    pub name: String,
    /// Contact phone
    pub phone: String,
}

impl EmergencyContact {
    /// Both fields are non-empty after trimming.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.phone.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_checked_multiply() {
        let price = Money::from_rupees(599);
        assert_eq!(price.checked_multiply(6), Some(Money::from_rupees(3594)));
        assert_eq!(Money::from_rupees(u64::MAX).checked_multiply(2), None);
    }

    #[test]
    fn money_display_uses_rupee_sign() {
        assert_eq!(Money::from_rupees(28999).to_string(), "₹28999");
    }

    #[test]
    fn contact_completeness_trims_whitespace() {
        let contact = ContactDetails {
            name: "Asha".to_string(),
            email: "  ".to_string(),
            phone: "9999999999".to_string(),
        };
        assert!(!contact.is_complete());

        let contact = ContactDetails {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9999999999".to_string(),
        };
        assert!(contact.is_complete());
    }

    #[test]
    fn product_type_display() {
        assert_eq!(ProductType::Trip.to_string(), "trip");
        assert_eq!(ProductType::Stay.to_string(), "stay");
    }
}
