//! The three-step booking wizard.
//!
//! `Selection → ContactDetails → Review → (external) Payment`. Linear, no
//! branching; abandonment discards the draft. The reducer is entirely pure:
//! nothing is persisted until the payment step, so every action mutates the
//! draft in place and produces no effects. Invalidity never raises an error,
//! it only disables advancing.

use crate::availability::{self, PARTY_CAP};
use crate::catalog::{StayEntry, TripEntry};
use crate::pricing;
use crate::types::{ContactDetails, EmergencyContact, Money, ProductType};
use chrono::NaiveDate;
use wayfare_core::{Effect, Reducer, SmallVec};

/// Wizard step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Room/date or batch/traveller selection
    Selection,
    /// Contact details (trip adds an emergency contact)
    ContactDetails,
    /// Review; advancing produces the payment redirect
    Review,
}

/// The product under booking plus its draft selection.
#[derive(Clone, Debug)]
pub enum ProductDraft {
    /// Multi-night stay draft
    Stay {
        /// The stay being booked
        stay: StayEntry,
        /// Selected room, index into `stay.rooms`
        room_type_index: usize,
        /// Check-in date
        check_in: Option<NaiveDate>,
        /// Check-out date
        check_out: Option<NaiveDate>,
        /// Guests, 1 to 4
        guest_count: u32,
    },
    /// Dated group trip draft
    Trip {
        /// The trip being booked
        trip: TripEntry,
        /// Selected departure, index into `trip.batches`
        date_batch_index: usize,
        /// Travellers, 1 to `min(spots_remaining, 4)`
        traveller_count: u32,
    },
}

/// Wizard state: the ephemeral booking draft.
#[derive(Clone, Debug)]
pub struct BookingFlowState {
    /// Current step
    pub step: Step,
    /// Product and selection draft
    pub draft: ProductDraft,
    /// Contact details
    pub contact: ContactDetails,
    /// Emergency contact, required for trips only
    pub emergency: EmergencyContact,
    /// Set when the review step advances; the draft's terminal output
    pub payment_redirect: Option<PaymentRedirect>,
}

impl BookingFlowState {
    /// Mount the wizard for a stay: step one, first room, one guest.
    #[must_use]
    pub fn for_stay(stay: StayEntry) -> Self {
        Self {
            step: Step::Selection,
            draft: ProductDraft::Stay {
                stay,
                room_type_index: 0,
                check_in: None,
                check_out: None,
                guest_count: 1,
            },
            contact: ContactDetails::default(),
            emergency: EmergencyContact::default(),
            payment_redirect: None,
        }
    }

    /// Mount the wizard for a trip: step one, first batch, one traveller.
    #[must_use]
    pub fn for_trip(trip: TripEntry) -> Self {
        Self {
            step: Step::Selection,
            draft: ProductDraft::Trip {
                trip,
                date_batch_index: 0,
                traveller_count: 1,
            },
            contact: ContactDetails::default(),
            emergency: EmergencyContact::default(),
            payment_redirect: None,
        }
    }

    /// Whole nights of the stay draft; `None` until both dates are set.
    #[must_use]
    pub fn nights(&self) -> Option<i64> {
        match &self.draft {
            ProductDraft::Stay {
                check_in: Some(check_in),
                check_out: Some(check_out),
                ..
            } => Some(availability::nights(*check_in, *check_out)),
            _ => None,
        }
    }

    /// Total price of the current draft, when it is priceable.
    #[must_use]
    pub fn total_price(&self) -> Option<Money> {
        match &self.draft {
            ProductDraft::Stay {
                stay,
                room_type_index,
                guest_count,
                ..
            } => {
                let room = stay.rooms.get(*room_type_index)?;
                pricing::stay_total(room.price_per_night, *guest_count, self.nights()?)
            }
            ProductDraft::Trip {
                trip,
                traveller_count,
                ..
            } => pricing::trip_total(trip.price, *traveller_count),
        }
    }

    /// Whether the current step's Continue control is enabled.
    #[must_use]
    pub fn can_proceed(&self) -> bool {
        match self.step {
            Step::Selection => match &self.draft {
                ProductDraft::Stay { .. } => self.nights().is_some_and(|n| n > 0),
                ProductDraft::Trip {
                    trip,
                    date_batch_index,
                    traveller_count,
                } => trip
                    .batches
                    .get(*date_batch_index)
                    .is_some_and(|batch| availability::fits_batch(batch, *traveller_count)),
            },
            Step::ContactDetails => {
                let contact_ok = self.contact.is_complete();
                match &self.draft {
                    ProductDraft::Stay { .. } => contact_ok,
                    ProductDraft::Trip { .. } => contact_ok && self.emergency.is_complete(),
                }
            }
            // Terminal step; advancing redirects.
            Step::Review => true,
        }
    }

    fn build_payment_redirect(&self) -> Option<PaymentRedirect> {
        let total = self.total_price()?;
        let mut params: Vec<(String, String)> = Vec::new();

        let (product_type, id) = match &self.draft {
            ProductDraft::Stay {
                stay,
                room_type_index,
                check_in,
                check_out,
                guest_count,
            } => {
                params.push(("room".to_string(), room_type_index.to_string()));
                if let Some(check_in) = check_in {
                    params.push(("check_in".to_string(), check_in.to_string()));
                }
                if let Some(check_out) = check_out {
                    params.push(("check_out".to_string(), check_out.to_string()));
                }
                params.push(("guests".to_string(), guest_count.to_string()));
                (ProductType::Stay, stay.id.to_string())
            }
            ProductDraft::Trip {
                trip,
                date_batch_index,
                traveller_count,
            } => {
                params.push(("batch".to_string(), date_batch_index.to_string()));
                params.push(("travellers".to_string(), traveller_count.to_string()));
                (ProductType::Trip, trip.id.to_string())
            }
        };

        params.push(("total".to_string(), total.rupees().to_string()));
        params.push(("name".to_string(), self.contact.name.clone()));
        params.push(("email".to_string(), self.contact.email.clone()));
        params.push(("phone".to_string(), self.contact.phone.clone()));

        Some(PaymentRedirect {
            product_type,
            id,
            params,
        })
    }
}

/// The draft encoded for the payment route; the wizard's only output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRedirect {
    /// stay or trip
    pub product_type: ProductType,
    /// Product id
    pub id: String,
    /// Selection and contact parameters
    pub params: Vec<(String, String)>,
}

impl PaymentRedirect {
    /// The payment route with the draft as query parameters.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut query = format!("/payment?type={}&id={}", self.product_type, self.id);
        for (key, value) in &self.params {
            query.push('&');
            query.push_str(key);
            query.push('=');
            query.push_str(value);
        }
        query
    }
}

/// Every input to the wizard.
#[derive(Clone, Debug)]
pub enum BookingFlowAction {
    /// Continue to the next step (gated on `can_proceed`)
    Advance,
    /// Back to the previous step; no-op on the first
    Retreat,
    /// Pick a room (stay)
    SelectRoom(usize),
    /// Pick a departure batch (trip)
    SelectBatch(usize),
    /// Set the check-in date (stay)
    SetCheckIn(NaiveDate),
    /// Set the check-out date (stay)
    SetCheckOut(NaiveDate),
    /// Set the guest count (stay)
    SetGuestCount(u32),
    /// Set the traveller count (trip)
    SetTravellerCount(u32),
    /// Replace the contact details
    ContactChanged(ContactDetails),
    /// Replace the emergency contact (trip)
    EmergencyChanged(EmergencyContact),
}

/// The wizard has no dependencies; everything is in the draft.
#[derive(Clone, Copy, Debug, Default)]
pub struct BookingFlowEnvironment;

/// Reducer for the booking wizard.
#[derive(Clone, Debug, Default)]
pub struct BookingFlowReducer;

impl BookingFlowReducer {
    /// Creates a new `BookingFlowReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for BookingFlowReducer {
    type State = BookingFlowState;
    type Action = BookingFlowAction;
    type Environment = BookingFlowEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BookingFlowAction::Advance => {
                if !state.can_proceed() {
                    return SmallVec::new();
                }
                match state.step {
                    Step::Selection => state.step = Step::ContactDetails,
                    Step::ContactDetails => state.step = Step::Review,
                    Step::Review => state.payment_redirect = state.build_payment_redirect(),
                }
                SmallVec::new()
            }

            BookingFlowAction::Retreat => {
                match state.step {
                    Step::Selection => {}
                    Step::ContactDetails => state.step = Step::Selection,
                    Step::Review => state.step = Step::ContactDetails,
                }
                SmallVec::new()
            }

            BookingFlowAction::SelectRoom(index) => {
                if let ProductDraft::Stay {
                    stay,
                    room_type_index,
                    ..
                } = &mut state.draft
                {
                    if index < stay.rooms.len() {
                        *room_type_index = index;
                    }
                }
                SmallVec::new()
            }

            BookingFlowAction::SelectBatch(index) => {
                if let ProductDraft::Trip {
                    trip,
                    date_batch_index,
                    traveller_count,
                } = &mut state.draft
                {
                    if let Some(batch) = trip.batches.get(index) {
                        if availability::batch_selectable(batch) {
                            *date_batch_index = index;
                            // Keep the count within the new batch's spots.
                            *traveller_count =
                                (*traveller_count).min(availability::traveller_ceiling(batch));
                        }
                    }
                }
                SmallVec::new()
            }

            BookingFlowAction::SetCheckIn(date) => {
                if let ProductDraft::Stay { check_in, .. } = &mut state.draft {
                    *check_in = Some(date);
                }
                SmallVec::new()
            }

            BookingFlowAction::SetCheckOut(date) => {
                if let ProductDraft::Stay { check_out, .. } = &mut state.draft {
                    *check_out = Some(date);
                }
                SmallVec::new()
            }

            BookingFlowAction::SetGuestCount(count) => {
                if let ProductDraft::Stay { guest_count, .. } = &mut state.draft {
                    if (1..=PARTY_CAP).contains(&count) {
                        *guest_count = count;
                    }
                }
                SmallVec::new()
            }

            BookingFlowAction::SetTravellerCount(count) => {
                if let ProductDraft::Trip {
                    trip,
                    date_batch_index,
                    traveller_count,
                } = &mut state.draft
                {
                    if trip
                        .batches
                        .get(*date_batch_index)
                        .is_some_and(|batch| availability::fits_batch(batch, count))
                    {
                        *traveller_count = count;
                    }
                }
                SmallVec::new()
            }

            BookingFlowAction::ContactChanged(contact) => {
                state.contact = contact;
                SmallVec::new()
            }

            BookingFlowAction::EmergencyChanged(emergency) => {
                state.emergency = emergency;
                SmallVec::new()
            }
        }
    }
}
