//! Password hashing and verification using Argon2id.
//!
//! Hashes are stored in the PHC-like string form
//! `$argon2id$v=19$m=<kib>,t=<iterations>,p=<lanes>$<salt>$<hash>` so the
//! parameters travel with the hash and can be raised without breaking old
//! accounts.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::prelude::*;
use rand::{rng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,

    #[error("Base64 decoding failed: {0}")]
    DecodingFailed(#[from] base64::DecodeError),
}

/// Argon2id cost parameters.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Memory cost in KiB
    pub memory_cost: u32,
    pub time_cost:   u32,
    pub parallelism: u32,
    /// Output length in bytes
    pub hash_length: u32,
    pub salt_length: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost: 15360,
            time_cost:   3,
            parallelism: 2,
            hash_length: 32,
            salt_length: 16,
        }
    }
}

fn argon2(memory_cost: u32, time_cost: u32, parallelism: u32, output_len: usize) -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(memory_cost, time_cost, parallelism, Some(output_len))
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password using Argon2id.
///
/// ```
/// use auth::password::hash_password;
/// use secrecy::{ExposeSecret, SecretString};
///
/// let hash = hash_password(&SecretString::from("Recruiter42".to_string()), None).unwrap();
/// assert!(hash.expose_secret().starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &SecretString, config: Option<PasswordConfig>) -> Result<SecretString, PasswordError> {
    let config = config.unwrap_or_default();

    let mut salt = vec![0u8; config.salt_length as usize];
    rng().fill_bytes(&mut salt);

    let mut output = vec![0u8; config.hash_length as usize];
    argon2(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        output.len(),
    )?
    .hash_password_into(password.expose_secret().as_bytes(), &salt, &mut output)
    .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(SecretString::from(format!(
        "$argon2id$v=19$m={},t={},p={}${}${}",
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        BASE64_STANDARD.encode(&salt),
        BASE64_STANDARD.encode(&output)
    )))
}

/// Cost parameters parsed from the `m=..,t=..,p=..` segment.
fn parse_params(segment: &str) -> Result<(u32, u32, u32), PasswordError> {
    let mut memory_cost = None;
    let mut time_cost = None;
    let mut parallelism = None;

    for pair in segment.split(',') {
        let (key, value) = pair.split_once('=').ok_or(PasswordError::InvalidHashFormat)?;
        let value: u32 = value.parse().map_err(|_| PasswordError::InvalidHashFormat)?;
        match key {
            "m" => memory_cost = Some(value),
            "t" => time_cost = Some(value),
            "p" => parallelism = Some(value),
            _ => return Err(PasswordError::InvalidHashFormat),
        }
    }

    match (memory_cost, time_cost, parallelism) {
        (Some(m), Some(t), Some(p)) => Ok((m, t, p)),
        _ => Err(PasswordError::InvalidHashFormat),
    }
}

/// Verifies a password against a stored hash produced by [`hash_password`].
pub fn verify_password(password: &SecretString, expected_hash: &str) -> Result<(), PasswordError> {
    // ["", "argon2id", "v=19", "m=..,t=..,p=..", salt, hash]
    let parts: Vec<&str> = expected_hash.split('$').collect();
    if parts.len() != 6 || !parts[0].is_empty() || parts[1] != "argon2id" || parts[2] != "v=19" {
        return Err(PasswordError::InvalidHashFormat);
    }

    let (memory_cost, time_cost, parallelism) = parse_params(parts[3])?;
    let salt = BASE64_STANDARD.decode(parts[4])?;
    let stored_hash = BASE64_STANDARD.decode(parts[5])?;
    if stored_hash.is_empty() {
        return Err(PasswordError::InvalidHashFormat);
    }

    let mut computed_hash = vec![0u8; stored_hash.len()];
    argon2(memory_cost, time_cost, parallelism, stored_hash.len())?
        .hash_password_into(
            password.expose_secret().as_bytes(),
            &salt,
            &mut computed_hash,
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    if computed_hash.as_slice().ct_eq(&stored_hash).into() {
        Ok(())
    }
    else {
        Err(PasswordError::VerificationFailed)
    }
}

/// Checks a new password against the account password policy: at least 8
/// characters with an uppercase letter, a lowercase letter and a digit.
pub fn validate_password_strength(password: &str) -> Result<(), Vec<PasswordValidationError>> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push(PasswordValidationError::TooShort);
    }
    if password.len() > 256 {
        errors.push(PasswordValidationError::TooLong);
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        errors.push(PasswordValidationError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        errors.push(PasswordValidationError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(PasswordValidationError::MissingDigit);
    }

    if errors.is_empty() {
        Ok(())
    }
    else {
        Err(errors)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordValidationError {
    #[error("Password must be at least 8 characters long")]
    TooShort,

    #[error("Password must be at most 256 characters long")]
    TooLong,

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one number")]
    MissingDigit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Option<PasswordConfig> {
        Some(PasswordConfig {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
            ..PasswordConfig::default()
        })
    }

    #[test]
    fn test_hash_and_verify() {
        let password = SecretString::from("TestPassword123".to_string());
        let hash = hash_password(&password, None).unwrap();
        let result = verify_password(&password, hash.expose_secret());
        assert!(result.is_ok(), "Verification failed: {:?}", result);
    }

    #[test]
    fn test_wrong_password_fails() {
        let password = SecretString::from("CorrectPassword1".to_string());
        let wrong_password = SecretString::from("WrongPassword1".to_string());
        let hash = hash_password(&password, cheap()).unwrap();
        assert!(matches!(
            verify_password(&wrong_password, hash.expose_secret()),
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[test]
    fn test_custom_params_are_encoded_and_honoured() {
        let password = SecretString::from("Employer2025".to_string());
        let hash = hash_password(&password, cheap()).unwrap();
        assert!(hash.expose_secret().contains("$m=1024,t=1,p=1$"));
        assert!(verify_password(&password, hash.expose_secret()).is_ok());
    }

    #[test]
    fn test_malformed_hashes_rejected() {
        let password = SecretString::from("Whatever1".to_string());
        for bad in [
            "",
            "$argon2i$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA",
            "$argon2id$v=16$m=1024,t=1,p=1$c2FsdA$aGFzaA",
            "$argon2id$v=19$m=1024,t=1$c2FsdA$aGFzaA",
            "$argon2id$v=19$m=abc,t=1,p=1$c2FsdA$aGFzaA",
        ] {
            assert!(
                matches!(verify_password(&password, bad), Err(PasswordError::InvalidHashFormat)),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_password_strength() {
        assert!(validate_password_strength("Abcdefg1").is_ok());

        let errors = validate_password_strength("abc").unwrap_err();
        assert!(errors.contains(&PasswordValidationError::TooShort));
        assert!(errors.contains(&PasswordValidationError::MissingUppercase));
        assert!(errors.contains(&PasswordValidationError::MissingDigit));
        assert!(!errors.contains(&PasswordValidationError::MissingLowercase));
    }
}
