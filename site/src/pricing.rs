//! Booking price computation.
//!
//! One pure formula: `total = unit_price × quantity × nights_or_one`. Stays
//! multiply the room's nightly price by guests and nights; trips multiply the
//! flat price by travellers. Integer rupees only; no proration, discounts,
//! taxes, or rounding.

use crate::types::Money;

/// Total for a stay: `price_per_night × guest_count × nights`.
///
/// `None` when `nights` is not positive or the product overflows.
#[must_use]
pub fn stay_total(price_per_night: Money, guest_count: u32, nights: i64) -> Option<Money> {
    let nights = u32::try_from(nights).ok().filter(|n| *n > 0)?;
    price_per_night
        .checked_multiply(guest_count)?
        .checked_multiply(nights)
}

/// Total for a trip: `flat_price × traveller_count`.
///
/// `None` on overflow.
#[must_use]
pub fn trip_total(flat_price: Money, traveller_count: u32) -> Option<Money> {
    flat_price.checked_multiply(traveller_count)
}
