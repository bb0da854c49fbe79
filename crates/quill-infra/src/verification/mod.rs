//! Verification-code delivery.
//!
//! Production deployments plug a real email/SMS gateway in here; the dev
//! sender just logs the code so it never leaks into an HTTP response.

use async_trait::async_trait;
use rand::Rng;

use quill_core::ports::{VerificationError, VerificationSender};

/// Generate a 6-digit verification code.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(0..1_000_000))
}

/// Development sender - writes the code to the log instead of delivering it.
pub struct LogVerificationSender;

#[async_trait]
impl VerificationSender for LogVerificationSender {
    async fn send(&self, email: &str, name: &str, code: &str) -> Result<(), VerificationError> {
        tracing::info!(
            recipient = %email,
            name = %name,
            code = %code,
            "Verification code issued (dev sender, not delivered)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
