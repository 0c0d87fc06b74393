//! Password hashing and reset token generation.
//!
//! # Responsibility
//! - Derive salted SHA-256 digests for stored credentials.
//! - Verify candidate passwords without early-exit comparison.
//!
//! # Invariants
//! - Plaintext passwords are never persisted or logged.
//! - Every derive call uses a fresh random salt.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Username seeded when the store has no admin.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Password seeded alongside [`DEFAULT_ADMIN_USERNAME`].
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Stored form of one password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub salt: String,
    pub digest: String,
}

impl PasswordHash {
    /// Hashes `password` under a freshly generated salt.
    pub fn derive(password: &str) -> Self {
        Self::with_salt(Uuid::new_v4().simple().to_string(), password)
    }

    /// Hashes `password` under a caller-provided salt.
    pub fn with_salt(salt: impl Into<String>, password: &str) -> Self {
        let salt = salt.into();
        let digest = digest_hex(&salt, password);
        Self { salt, digest }
    }

    /// Returns whether `password` matches this hash. Case-sensitive.
    pub fn verify(&self, password: &str) -> bool {
        let candidate = digest_hex(&self.salt, password);
        constant_time_eq(candidate.as_bytes(), self.digest.as_bytes())
    }
}

/// Generates an opaque single-use reset token.
pub fn new_reset_token() -> String {
    Uuid::new_v4().simple().to_string()
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::{new_reset_token, PasswordHash};

    #[test]
    fn derive_then_verify_is_case_sensitive() {
        let hash = PasswordHash::derive("Secret1");
        assert!(hash.verify("Secret1"));
        assert!(!hash.verify("secret1"));
        assert!(!hash.verify(""));
    }

    #[test]
    fn derive_uses_distinct_salts() {
        let first = PasswordHash::derive("same");
        let second = PasswordHash::derive("same");
        assert_ne!(first.salt, second.salt);
        assert_ne!(first.digest, second.digest);
    }

    #[test]
    fn with_salt_is_deterministic() {
        let first = PasswordHash::with_salt("salt", "pw");
        let second = PasswordHash::with_salt("salt", "pw");
        assert_eq!(first, second);
        assert_eq!(first.digest.len(), 64);
    }

    #[test]
    fn reset_tokens_are_unique() {
        assert_ne!(new_reset_token(), new_reset_token());
    }
}
