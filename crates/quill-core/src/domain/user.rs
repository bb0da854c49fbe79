use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - represents an author in the system.
///
/// Verification state machine: a freshly registered user is unverified and
/// holds a pending code; [`User::verify`] consumes it within the expiry
/// window and flips `is_verified`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub verification_code: Option<String>,
    pub verification_sent_at: Option<DateTime<Utc>>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How long a verification code stays valid.
pub const VERIFICATION_CODE_TTL_MINUTES: i64 = 10;

impl User {
    /// Create a new unverified user with a pending verification code.
    pub fn new(name: String, email: String, password_hash: String, code: String) -> Self {
        let now = Utc::now();
        let avatar = format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", email);
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            avatar: Some(avatar),
            bio: None,
            verification_code: Some(code),
            verification_sent_at: Some(now),
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the pending verification code has passed its 10-minute window.
    pub fn verification_expired(&self, now: DateTime<Utc>) -> bool {
        match self.verification_sent_at {
            Some(sent) => now - sent > chrono::TimeDelta::minutes(VERIFICATION_CODE_TTL_MINUTES),
            None => false,
        }
    }

    /// Consume a matching verification code and mark the account verified.
    ///
    /// Returns `false` if the code does not match the pending one.
    pub fn verify(&mut self, code: &str) -> bool {
        if self.verification_code.as_deref() != Some(code) {
            return false;
        }
        self.is_verified = true;
        self.verification_code = None;
        self.verification_sent_at = None;
        self.updated_at = Utc::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
            "123456".to_string(),
        )
    }

    #[test]
    fn test_new_user_is_unverified() {
        let user = test_user();
        assert!(!user.is_verified);
        assert_eq!(user.verification_code.as_deref(), Some("123456"));
    }

    #[test]
    fn test_verify_with_correct_code() {
        let mut user = test_user();
        assert!(user.verify("123456"));
        assert!(user.is_verified);
        assert!(user.verification_code.is_none());
        assert!(user.verification_sent_at.is_none());
    }

    #[test]
    fn test_verify_with_wrong_code() {
        let mut user = test_user();
        assert!(!user.verify("000000"));
        assert!(!user.is_verified);
        assert!(user.verification_code.is_some());
    }

    #[test]
    fn test_verification_expiry_window() {
        let user = test_user();
        let now = Utc::now();
        assert!(!user.verification_expired(now));
        assert!(!user.verification_expired(now + chrono::TimeDelta::minutes(9)));
        assert!(user.verification_expired(now + chrono::TimeDelta::minutes(11)));
    }
}
