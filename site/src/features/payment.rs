//! The simulated payment step.
//!
//! Mounted from the payment route with the draft's query parameters. `Begin`
//! hands the amount to the gateway, which settles after its fixed,
//! non-cancellable delay; `Settled` produces the confirmation redirect
//! carrying the product type and id. There is no decline path and no
//! cancellation.

use crate::gateway::PaymentGateway;
use crate::types::{Money, ProductType};
use std::sync::Arc;
use wayfare_core::{async_effect, Effect, Reducer, SmallVec};

/// Where the payment step is in its one-way progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Mounted, not yet started
    Pending,
    /// Waiting out the gateway delay
    Processing,
    /// Settled; the redirect is set
    Settled,
}

/// Payment step state.
#[derive(Clone, Debug)]
pub struct PaymentState {
    /// stay or trip, carried through to the confirmation route
    pub product_type: ProductType,
    /// Product id, carried through to the confirmation route
    pub product_id: String,
    /// Amount from the draft's query parameters
    pub amount: Money,
    /// Progression
    pub status: PaymentStatus,
    /// Gateway reference, once settled
    pub reference: Option<String>,
    /// The confirmation route, once settled
    pub confirmation_redirect: Option<String>,
}

impl PaymentState {
    /// Mount the payment step from the redirect parameters.
    #[must_use]
    pub const fn new(product_type: ProductType, product_id: String, amount: Money) -> Self {
        Self {
            product_type,
            product_id,
            amount,
            status: PaymentStatus::Pending,
            reference: None,
            confirmation_redirect: None,
        }
    }
}

/// Every input to the payment step.
#[derive(Clone, Debug)]
pub enum PaymentAction {
    /// Start the simulated settlement
    Begin,
    /// The gateway settled
    Settled {
        /// Gateway reference
        reference: String,
    },
}

/// Dependencies of the payment step.
#[derive(Clone)]
pub struct PaymentEnvironment {
    /// The (simulated) gateway
    pub gateway: Arc<dyn PaymentGateway>,
}

impl PaymentEnvironment {
    /// Creates a new `PaymentEnvironment`
    #[must_use]
    pub const fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }
}

/// Reducer for the payment step.
#[derive(Clone, Debug, Default)]
pub struct PaymentReducer;

impl PaymentReducer {
    /// Creates a new `PaymentReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for PaymentReducer {
    type State = PaymentState;
    type Action = PaymentAction;
    type Environment = PaymentEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            PaymentAction::Begin => {
                if state.status != PaymentStatus::Pending {
                    return SmallVec::new();
                }
                state.status = PaymentStatus::Processing;

                let settle = env.gateway.settle(state.amount);
                let effect = async_effect! {
                    let receipt = settle.await;
                    Some(PaymentAction::Settled {
                        reference: receipt.reference,
                    })
                };
                wayfare_core::smallvec![effect]
            }

            PaymentAction::Settled { reference } => {
                state.status = PaymentStatus::Settled;
                state.reference = Some(reference);
                state.confirmation_redirect = Some(format!(
                    "/confirmation?type={}&id={}",
                    state.product_type, state.product_id
                ));
                SmallVec::new()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code can use unwrap/panic
mod tests {
    use super::*;
    use crate::gateway::SimulatedGateway;
    use std::time::Duration;
    use wayfare_testing::{assertions, ReducerTest};

    fn env() -> PaymentEnvironment {
        PaymentEnvironment::new(SimulatedGateway::shared(Duration::from_millis(1)))
    }

    fn pending_state() -> PaymentState {
        PaymentState::new(
            ProductType::Trip,
            "550e8400-e29b-41d4-a716-446655440000".to_string(),
            Money::from_rupees(86997),
        )
    }

    #[test]
    fn begin_moves_to_processing_and_schedules_settlement() {
        ReducerTest::new(PaymentReducer::new())
            .with_env(env())
            .given_state(pending_state())
            .when_action(PaymentAction::Begin)
            .then_state(|state| {
                assert_eq!(state.status, PaymentStatus::Processing);
                assert!(state.confirmation_redirect.is_none());
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn begin_twice_does_not_double_settle() {
        let mut state = pending_state();
        let reducer = PaymentReducer::new();
        let env = env();

        let first = reducer.reduce(&mut state, PaymentAction::Begin, &env);
        assertions::assert_effects_count(&first, 1);
        let second = reducer.reduce(&mut state, PaymentAction::Begin, &env);
        assertions::assert_no_effects(&second);
    }

    #[test]
    fn settled_produces_the_confirmation_redirect() {
        let mut state = pending_state();
        state.status = PaymentStatus::Processing;
        let reducer = PaymentReducer::new();

        reducer.reduce(
            &mut state,
            PaymentAction::Settled {
                reference: "pay_00c0ffee".to_string(),
            },
            &env(),
        );
        assert_eq!(state.status, PaymentStatus::Settled);
        assert_eq!(
            state.confirmation_redirect.as_deref(),
            Some("/confirmation?type=trip&id=550e8400-e29b-41d4-a716-446655440000")
        );
    }

    #[tokio::test]
    async fn settlement_effect_yields_the_gateway_reference() {
        let mut state = pending_state();
        let reducer = PaymentReducer::new();
        let mut effects = reducer.reduce(
            &mut state,
            PaymentAction::Begin,
            &PaymentEnvironment::new(SimulatedGateway::shared(Duration::from_millis(1))),
        );

        let Some(Effect::Future(future)) = effects.pop() else {
            panic!("expected a future effect");
        };
        let Some(PaymentAction::Settled { reference }) = future.await else {
            panic!("expected a settled action");
        };
        assert!(reference.starts_with("pay_"));
    }
}
