//! Password hashing and validation.
//!
//! Uses Argon2id for one-way password hashing. Verification compares a
//! presented password against the stored PHC hash string.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 100;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password is too short.
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    TooShort,

    /// Password is too long.
    #[error("Password must not exceed {MAX_PASSWORD_LENGTH} characters")]
    TooLong,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Create the Argon2 hasher with the configured cost parameters.
///
/// Parameters:
/// - Memory cost: 64 MB (65536 KiB)
/// - Time cost: 3 iterations
/// - Parallelism: 4 threads
fn create_argon2() -> Argon2<'static> {
    let m_cost = 65536;
    let t_cost = 3;
    let p_cost = 4;

    let params = Params::new(m_cost, t_cost, p_cost, None).expect("valid Argon2 params");
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

/// Hash a password using Argon2id.
///
/// Returns a PHC-formatted hash string that includes the salt and parameters.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);

    let argon2 = create_argon2();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// Returns `Ok(())` if the password matches, or an error if it doesn't.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    // Parameters come from the parsed hash, not from create_argon2()
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// Validate password length requirements.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_success() {
        let hash = hash_password("tec123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$")); // Version 0x13 = 19
    }

    #[test]
    fn test_hash_password_different_hashes() {
        let password = "same_password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();

        // Same password should produce different hashes (different salts)
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let password = "correct_password";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).is_ok());
    }

    #[test]
    fn test_verify_password_wrong() {
        let hash = hash_password("correct_password").unwrap();

        let result = verify_password("wrong_password", &hash);
        assert!(matches!(result, Err(PasswordError::VerificationFailed)));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("any_password", "not_a_valid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[test]
    fn test_validate_password_too_short() {
        let result = validate_password("abc12");
        assert!(matches!(result, Err(PasswordError::TooShort)));
    }

    #[test]
    fn test_validate_password_minimum_length() {
        // Exactly 6 characters (observed minimum)
        assert!(validate_password("tec123").is_ok());
    }

    #[test]
    fn test_validate_password_too_long() {
        let long_password = "a".repeat(101);
        let result = validate_password(&long_password);
        assert!(matches!(result, Err(PasswordError::TooLong)));
    }

    #[test]
    fn test_validate_password_maximum_length() {
        let max_password = "a".repeat(100);
        assert!(validate_password(&max_password).is_ok());
    }

    #[test]
    fn test_hash_rejects_short_password() {
        let result = hash_password("ab1");
        assert!(matches!(result, Err(PasswordError::TooShort)));
    }

    #[test]
    fn test_password_with_special_chars() {
        let password = "p@$$w0rd!#$%^&*()";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).is_ok());
    }

    #[test]
    fn test_password_error_display() {
        assert_eq!(
            PasswordError::TooShort.to_string(),
            "Password must be at least 6 characters long"
        );
        assert_eq!(
            PasswordError::TooLong.to_string(),
            "Password must not exceed 100 characters"
        );
    }
}
