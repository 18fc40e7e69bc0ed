//! Simulated payment gateway.
//!
//! There is no real payment processor: the gateway sleeps for a fixed,
//! non-cancellable delay and then settles, producing a reference for the
//! confirmation redirect. The delay length comes from configuration
//! (`PAYMENT_DELAY_MS`).

use crate::types::Money;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Settled payment, as much of one as the simulation produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// Gateway reference for the confirmation page
    pub reference: String,
    /// Amount settled
    pub amount: Money,
}

/// Payment gateway trait.
///
/// The simulation always settles; a real processor would surface declines
/// through the same seam.
pub trait PaymentGateway: Send + Sync {
    /// Settle a payment after the gateway's fixed delay.
    fn settle(&self, amount: Money) -> Pin<Box<dyn Future<Output = PaymentReceipt> + Send>>;
}

/// Fixed-delay gateway used in every environment.
#[derive(Clone, Debug)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    /// Creates a gateway with the given settlement delay
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(delay: Duration) -> Arc<dyn PaymentGateway> {
        Arc::new(Self::new(delay))
    }
}

impl PaymentGateway for SimulatedGateway {
    fn settle(&self, amount: Money) -> Pin<Box<dyn Future<Output = PaymentReceipt> + Send>> {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;

            let suffix: u32 = rand::random();
            let reference = format!("pay_{suffix:08x}");

            tracing::info!(
                reference = %reference,
                amount = amount.rupees(),
                "Simulated payment settled"
            );

            PaymentReceipt { reference, amount }
        })
    }
}
