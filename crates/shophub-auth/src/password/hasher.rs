//! Salted adaptive password hashing.
//!
//! New hashes use the configured algorithm (bcrypt by default). Verification
//! dispatches on the stored hash's prefix, so bcrypt and Argon2id hashes can
//! coexist in the users table.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use shophub_core::config::{AuthConfig, PasswordAlgorithm};
use shophub_core::error::AppError;

const ARGON2_PREFIX: &str = "$argon2";

/// Hashes and verifies user passwords.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    algorithm: PasswordAlgorithm,
    bcrypt_cost: u32,
}

impl PasswordHasher {
    /// Creates a hasher from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            algorithm: config.password_algorithm,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Hashes a plaintext password with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        match self.algorithm {
            PasswordAlgorithm::Bcrypt => bcrypt::hash(password, self.bcrypt_cost)
                .map_err(|e| AppError::internal(format!("Password hashing failed: {e}"))),
            PasswordAlgorithm::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
            }
        }
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        if hash.starts_with(ARGON2_PREFIX) {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;
            return match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(AppError::internal(format!(
                    "Password verification failed: {e}"
                ))),
            };
        }

        bcrypt::verify(password, hash)
            .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))
    }
}
