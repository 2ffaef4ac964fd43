//! Mail delivery abstraction.
//!
//! The OTP verification flow needs to send a code to the user's email
//! address. Delivery goes through the [`Mailer`] trait so the transport
//! can be swapped (SMTP in production, a recording stub in tests).

use async_trait::async_trait;
use log::info;

/// Errors a mail transport can report.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),

    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
}

/// A mail transport capable of delivering a plain-text message.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError>;
}

/// Mailer that writes messages to the log instead of delivering them.
///
/// Default transport for local development and tests.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), MailerError> {
        info!("mail to {}: {}", to, subject);
        Ok(())
    }
}
