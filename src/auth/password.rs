// Password hashing and verification service

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// Password hashing failures
#[derive(Debug, thiserror::Error)]
#[error("password hashing error: {0}")]
pub struct PasswordHashError(String);

/// Password service for hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a random salt
    pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordHashError(e.to_string()))
    }

    /// Verify a password against a stored PHC hash string
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(hash).map_err(|e| PasswordHashError(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = PasswordService::hash_password("Password12345").unwrap();
        assert_ne!(hash, "Password12345");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = PasswordService::hash_password("Password12345").unwrap();
        let second = PasswordService::hash_password("Password12345").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_matches_original_password() {
        let hash = PasswordService::hash_password("Password12345").unwrap();
        assert!(PasswordService::verify_password("Password12345", &hash).unwrap());
        assert!(!PasswordService::verify_password("Password12", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(PasswordService::verify_password("Password12345", "not-a-hash").is_err());
    }
}
