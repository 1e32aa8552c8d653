use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hashes a password into an argon2id PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash. Unparseable hashes
/// verify as false rather than erroring; the caller only needs yes/no.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("osss123").unwrap();
        assert!(verify_password("osss123", &hash));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("osss123").unwrap();
        assert!(!verify_password("osss124", &hash));
    }

    #[test]
    fn test_garbage_hash_rejected() {
        assert!(!verify_password("osss123", "not-a-phc-string"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("osss123").unwrap();
        let b = hash_password("osss123").unwrap();
        assert_ne!(a, b);
    }
}
