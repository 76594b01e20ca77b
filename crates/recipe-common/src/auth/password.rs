//! Password hashing and verification utilities
//!
//! Uses Argon2id for password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Minimum accepted password length in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if the hash is invalid
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Validate password strength for an account
///
/// Returns `Ok(())` if the password:
/// - is at least 8 characters long
/// - is not entirely numeric
/// - differs from the username and the email (case-insensitive)
///
/// # Errors
/// Returns a validation error if the password doesn't meet requirements
pub fn validate_password_strength(
    password: &str,
    username: &str,
    email: &str,
) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Password must not be entirely numeric".to_string(),
        ));
    }

    let lowered = password.to_lowercase();
    if lowered == username.to_lowercase() || lowered == email.to_lowercase() {
        return Err(AppError::Validation(
            "Password is too similar to the username or email".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let password = "SecurePassword123!";
        let hash = hash_password(password).unwrap();

        // Hash should start with argon2 identifier
        assert!(hash.starts_with("$argon2"));
        // Hash should be different each time (different salt)
        let hash2 = hash_password(password).unwrap();
        assert_ne!(hash, hash2);
    }

    #[test]
    fn test_verify_password() {
        let password = "SecurePassword123!";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("WrongPassword123!", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_bad_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-hash"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_validate_password_strength_valid() {
        assert!(validate_password_strength("pancakes42", "cook", "cook@example.com").is_ok());
        assert!(validate_password_strength("MyP@ssw0rd!", "cook", "cook@example.com").is_ok());
    }

    #[test]
    fn test_validate_password_strength_too_short() {
        let result = validate_password_strength("short1", "cook", "cook@example.com");
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("8 characters")));
    }

    #[test]
    fn test_validate_password_strength_numeric() {
        let result = validate_password_strength("1234567890", "cook", "cook@example.com");
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("numeric")));
    }

    #[test]
    fn test_validate_password_strength_matches_identity() {
        assert!(validate_password_strength("ChefJulia", "chefjulia", "julia@example.com").is_err());
        assert!(
            validate_password_strength("julia@example.com", "julia", "Julia@Example.com").is_err()
        );
    }
}
