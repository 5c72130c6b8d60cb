//! Outbound Mail Collaborator
//!
//! The core only needs "send a message to an address"; delivery transport
//! lives behind the [`Mailer`] trait. The shipped implementation logs the
//! message via `tracing`, which is sufficient for development and tests.

use thiserror::Error;

/// Mail delivery error
#[derive(Debug, Error)]
pub enum MailError {
    /// Recipient address was rejected by the transport
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    /// Transport-level delivery failure
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// An outbound message
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail sender trait
///
/// Invoked fire-and-forget by callers: delivery failure must never fail
/// the request that triggered the send.
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Deliver a single message
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

/// Mailer that "delivers" by writing the message to the log
///
/// Stands in for a real SMTP transport in development and tests.
#[derive(Debug, Clone, Default)]
pub struct TracingMailer;

impl Mailer for TracingMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        if !message.to.contains('@') {
            return Err(MailError::InvalidRecipient(message.to));
        }

        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Outbound mail"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tracing_mailer_accepts_valid_recipient() {
        let mailer = TracingMailer;
        let result = Mailer::send(
            &mailer,
            MailMessage {
                to: "alice@example.com".to_string(),
                subject: "Your confirmation code".to_string(),
                body: "Code: abc".to_string(),
            },
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_tracing_mailer_rejects_bad_recipient() {
        let mailer = TracingMailer;
        let result = Mailer::send(
            &mailer,
            MailMessage {
                to: "not-an-address".to_string(),
                subject: "x".to_string(),
                body: "y".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(MailError::InvalidRecipient(_))));
    }
}
