//! Verification-code delivery port.
//!
//! The code is handed to an external collaborator (email/SMS gateway) and is
//! never returned to the caller in an HTTP response.

use async_trait::async_trait;

/// Delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Side-channel delivery of account verification codes.
#[async_trait]
pub trait VerificationSender: Send + Sync {
    /// Deliver a verification code to the given recipient.
    async fn send(&self, email: &str, name: &str, code: &str) -> Result<(), VerificationError>;
}
