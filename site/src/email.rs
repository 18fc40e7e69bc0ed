//! Outbound email seam.
//!
//! Booking confirmations are best-effort: a send failure is logged and never
//! surfaced to the booking response, and nothing retries. The default mailer
//! only logs; real delivery would slot in behind the same trait.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Email delivery error
#[derive(Debug, Clone, Error)]
pub enum MailError {
    /// Recipient address rejected
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),
    /// Transport-level failure
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// A booking confirmation message.
#[derive(Debug, Clone)]
pub struct ConfirmationEmail {
    /// Recipient address
    pub to: String,
    /// Trip or stay name
    pub product_name: String,
    /// Booking id, for the reference line
    pub booking_reference: String,
    /// Total charged, already formatted
    pub total_display: String,
}

/// Outbound mailer trait.
pub trait Mailer: Send + Sync {
    /// Send a booking confirmation.
    ///
    /// # Errors
    ///
    /// Returns `MailError` when the message cannot be delivered.
    fn send_confirmation(
        &self,
        email: ConfirmationEmail,
    ) -> Pin<Box<dyn Future<Output = Result<(), MailError>> + Send>>;
}

/// Mailer that logs instead of delivering.
#[derive(Clone, Debug)]
pub struct LogMailer;

impl LogMailer {
    /// Creates a new log-only mailer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn Mailer> {
        Arc::new(Self::new())
    }
}

impl Default for LogMailer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mailer for LogMailer {
    fn send_confirmation(
        &self,
        email: ConfirmationEmail,
    ) -> Pin<Box<dyn Future<Output = Result<(), MailError>> + Send>> {
        Box::pin(async move {
            if !email.to.contains('@') {
                return Err(MailError::InvalidRecipient(email.to));
            }

            tracing::info!(
                to = %email.to,
                product = %email.product_name,
                reference = %email.booking_reference,
                total = %email.total_display,
                "Booking confirmation email"
            );

            Ok(())
        })
    }
}
