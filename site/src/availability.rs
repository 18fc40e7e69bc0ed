//! Availability and capacity rules.
//!
//! Trip departures carry a fixed `spots_remaining` counter per batch; stays
//! have no capacity ceiling beyond the hardcoded guest cap. Spot counters are
//! never decremented on booking, so concurrent bookings of a last spot can
//! all succeed; the booking desk stores whatever arrives.

use crate::catalog::DateBatch;
use chrono::NaiveDate;

/// Hard ceiling on guests per stay booking and travellers per trip booking.
pub const PARTY_CAP: u32 = 4;

/// Whole nights between check-in and check-out.
///
/// Negative when the range is inverted; a selection is valid only when this
/// is strictly positive.
#[must_use]
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Whether a batch can be selected at all.
#[must_use]
pub fn batch_selectable(batch: &DateBatch) -> bool {
    batch.spots_remaining > 0
}

/// Highest traveller count offered for a batch: `min(spots_remaining, 4)`.
#[must_use]
pub fn traveller_ceiling(batch: &DateBatch) -> u32 {
    batch.spots_remaining.min(PARTY_CAP)
}

/// Highest guest count offered for a stay.
#[must_use]
pub const fn guest_ceiling() -> u32 {
    PARTY_CAP
}

/// Whether a traveller count fits within a batch's remaining spots.
#[must_use]
pub fn fits_batch(batch: &DateBatch, traveller_count: u32) -> bool {
    traveller_count >= 1 && traveller_count <= traveller_ceiling(batch)
}
