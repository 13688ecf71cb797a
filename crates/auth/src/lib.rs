//! # Authentication
//!
//! Password hashing for the three account kinds and the cookie-based identity
//! model used by request gates and the tracking pipeline.
//!
//! Identity cookies are presence markers: a cookie named `studentId`,
//! `employerId` or `adminId` carries the id of the logged in account and is
//! trusted as-is.

pub mod identity;
pub mod password;

pub use identity::{Identity, IdentityCookies, IdentityError, Role, SessionIdentity, COOKIE_MAX_AGE_SECS};
pub use password::{hash_password, validate_password_strength, verify_password, PasswordConfig, PasswordError};
pub use secrecy;

use ::error::AppError;

/// Hash a plain text password with the default parameters, mapping failures
/// to an internal error.
pub fn hash_plain(password: &str) -> Result<String, AppError> {
    use secrecy::{ExposeSecret, SecretString};

    let hash = hash_password(&SecretString::from(password.to_string()), None)
        .map_err(|e| AppError::internal(e.to_string()))?;
    Ok(hash.expose_secret().to_string())
}

/// Check a plain text password against a stored hash.
///
/// Malformed hashes count as a mismatch so a corrupted row cannot be told
/// apart from a wrong password by the caller.
pub fn password_matches(password: &str, stored_hash: &str) -> bool {
    let password = secrecy::SecretString::from(password.to_string());
    verify_password(&password, stored_hash).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_plain_round_trip() {
        let hash = hash_plain("Placement2025").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(password_matches("Placement2025", &hash));
        assert!(!password_matches("placement2025", &hash));
    }

    #[test]
    fn test_garbage_hash_never_matches() {
        assert!(!password_matches("anything", "plain-text-password"));
    }
}
