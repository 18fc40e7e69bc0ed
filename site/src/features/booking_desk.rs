//! Server-side booking pipeline.
//!
//! `POST /api/bookings` sends a `Submit` action into the store hosting this
//! reducer and awaits the matching `Stored`/`StoreFailed` outcome with the
//! runtime's bounded handoff. The insert itself carries no timeout and no
//! retry, and nothing decrements batch spot counters; the desk stores
//! whatever arrives. The confirmation email is fire-and-forget.

use crate::email::{ConfirmationEmail, Mailer};
use crate::types::Money;
use std::sync::Arc;
use uuid::Uuid;
use wayfare_core::{async_effect, Effect, Reducer, SmallVec};
use wayfare_platform::{BookingRow, NewBooking, PlatformApi};

/// Pipeline counters; the interesting data rides in the actions.
#[derive(Clone, Debug, Default)]
pub struct BookingDeskState {
    /// Submissions accepted for processing
    pub accepted: u64,
    /// Bookings stored
    pub stored: u64,
    /// Submissions that failed validation or the insert
    pub failed: u64,
}

/// Every input to the booking pipeline.
#[derive(Clone, Debug)]
pub enum BookingDeskAction {
    /// A booking submission from the HTTP surface
    Submit {
        /// Correlates the outcome back to the waiting request
        request_id: Uuid,
        /// Booking owner
        user_id: Uuid,
        /// Confirmation recipient
        user_email: String,
        /// Trip being booked
        trip_id: Uuid,
        /// Trip name for the confirmation email
        trip_name: String,
        /// Total charge in whole rupees
        total_amount: u64,
    },
    /// The booking row was stored
    Stored {
        /// Correlates back to the waiting request
        request_id: Uuid,
        /// The stored row
        booking: BookingRow,
        /// Confirmation recipient
        user_email: String,
        /// Trip name for the confirmation email
        trip_name: String,
    },
    /// The submission was rejected or the insert failed
    StoreFailed {
        /// Correlates back to the waiting request
        request_id: Uuid,
        /// What went wrong
        message: String,
    },
}

/// Dependencies of the booking pipeline.
#[derive(Clone)]
pub struct BookingDeskEnvironment {
    /// Platform handle; `None` fails every submission
    pub platform: Option<Arc<dyn PlatformApi>>,
    /// Confirmation mailer
    pub mailer: Arc<dyn Mailer>,
}

impl BookingDeskEnvironment {
    /// Creates a new `BookingDeskEnvironment`
    #[must_use]
    pub const fn new(platform: Option<Arc<dyn PlatformApi>>, mailer: Arc<dyn Mailer>) -> Self {
        Self { platform, mailer }
    }
}

/// Reducer for the booking pipeline.
#[derive(Clone, Debug, Default)]
pub struct BookingDeskReducer;

impl BookingDeskReducer {
    /// Creates a new `BookingDeskReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for BookingDeskReducer {
    type State = BookingDeskState;
    type Action = BookingDeskAction;
    type Environment = BookingDeskEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BookingDeskAction::Submit {
                request_id,
                user_id,
                user_email,
                trip_id,
                trip_name,
                total_amount,
            } => {
                state.accepted += 1;

                if total_amount == 0 {
                    let effect = async_effect! {
                        Some(BookingDeskAction::StoreFailed {
                            request_id,
                            message: "total_amount must be positive".to_string(),
                        })
                    };
                    return wayfare_core::smallvec![effect];
                }

                let Some(platform) = env.platform.clone() else {
                    let effect = async_effect! {
                        Some(BookingDeskAction::StoreFailed {
                            request_id,
                            message: "platform unavailable".to_string(),
                        })
                    };
                    return wayfare_core::smallvec![effect];
                };

                let booking = NewBooking {
                    trip_id,
                    user_id,
                    total_amount,
                    status: "pending".to_string(),
                    payment_status: "unpaid".to_string(),
                };
                let effect = async_effect! {
                    match platform.insert_booking(booking).await {
                        Ok(booking) => Some(BookingDeskAction::Stored {
                            request_id,
                            booking,
                            user_email,
                            trip_name,
                        }),
                        Err(err) => Some(BookingDeskAction::StoreFailed {
                            request_id,
                            message: err.to_string(),
                        }),
                    }
                };
                wayfare_core::smallvec![effect]
            }

            BookingDeskAction::Stored {
                booking,
                user_email,
                trip_name,
                ..
            } => {
                state.stored += 1;

                // Best-effort: a failed confirmation email is logged, never
                // retried, never surfaced to the booking response.
                let mailer = Arc::clone(&env.mailer);
                let email = ConfirmationEmail {
                    to: user_email,
                    product_name: trip_name,
                    booking_reference: booking.id.to_string(),
                    total_display: Money::from_rupees(booking.total_amount).to_string(),
                };
                let effect = async_effect! {
                    if let Err(err) = mailer.send_confirmation(email).await {
                        tracing::error!(error = %err, "Confirmation email failed");
                    }
                    None
                };
                wayfare_core::smallvec![effect]
            }

            BookingDeskAction::StoreFailed { message, .. } => {
                state.failed += 1;
                tracing::error!(error = %message, "Booking submission failed");
                SmallVec::new()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code can use unwrap/panic
mod tests {
    use super::*;
    use crate::email::LogMailer;
    use chrono::Utc;
    use wayfare_testing::{assertions, ReducerTest};

    fn env_without_platform() -> BookingDeskEnvironment {
        BookingDeskEnvironment::new(None, LogMailer::shared())
    }

    fn submit(total_amount: u64) -> BookingDeskAction {
        BookingDeskAction::Submit {
            request_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_email: "asha@example.com".to_string(),
            trip_id: Uuid::new_v4(),
            trip_name: "Spiti Valley Circuit".to_string(),
            total_amount,
        }
    }

    fn stored_row(total_amount: u64) -> BookingRow {
        BookingRow {
            id: Uuid::new_v4(),
            trip_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            total_amount,
            status: "pending".to_string(),
            payment_status: "unpaid".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn submit_schedules_the_insert() {
        ReducerTest::new(BookingDeskReducer::new())
            .with_env(env_without_platform())
            .given_state(BookingDeskState::default())
            .when_action(submit(86997))
            .then_state(|state| {
                assert_eq!(state.accepted, 1);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[tokio::test]
    async fn zero_total_resolves_to_store_failed() {
        let mut state = BookingDeskState::default();
        let reducer = BookingDeskReducer::new();
        let mut effects = reducer.reduce(&mut state, submit(0), &env_without_platform());

        let Some(Effect::Future(future)) = effects.pop() else {
            panic!("expected a future effect");
        };
        let action = future.await.unwrap();
        assert!(matches!(
            action,
            BookingDeskAction::StoreFailed { ref message, .. }
                if message.contains("positive")
        ));
    }

    #[tokio::test]
    async fn missing_platform_resolves_to_store_failed() {
        let mut state = BookingDeskState::default();
        let reducer = BookingDeskReducer::new();
        let mut effects = reducer.reduce(&mut state, submit(86997), &env_without_platform());

        let Some(Effect::Future(future)) = effects.pop() else {
            panic!("expected a future effect");
        };
        let action = future.await.unwrap();
        assert!(matches!(
            action,
            BookingDeskAction::StoreFailed { ref message, .. }
                if message.contains("unavailable")
        ));
    }

    #[tokio::test]
    async fn stored_fires_a_fire_and_forget_email() {
        let mut state = BookingDeskState::default();
        let reducer = BookingDeskReducer::new();
        let mut effects = reducer.reduce(
            &mut state,
            BookingDeskAction::Stored {
                request_id: Uuid::new_v4(),
                booking: stored_row(86997),
                user_email: "asha@example.com".to_string(),
                trip_name: "Spiti Valley Circuit".to_string(),
            },
            &env_without_platform(),
        );

        assert_eq!(state.stored, 1);
        let Some(Effect::Future(future)) = effects.pop() else {
            panic!("expected a future effect");
        };
        // The email effect never produces a follow-up action.
        assert!(future.await.is_none());
    }

    #[test]
    fn store_failed_only_counts() {
        ReducerTest::new(BookingDeskReducer::new())
            .with_env(env_without_platform())
            .given_state(BookingDeskState::default())
            .when_action(BookingDeskAction::StoreFailed {
                request_id: Uuid::new_v4(),
                message: "boom".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.failed, 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
