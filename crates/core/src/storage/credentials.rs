use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Argon2id cost parameters used when hashing a new account secret.
/// Existing hashes carry their own parameters in the PHC string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 19456 = 19 MiB)
    pub memory_cost: u32,
    /// Number of iterations (default: 2)
    pub time_cost: u32,
    /// Degree of parallelism (default: 1)
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 19_456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Reject parameters that are unusable or that would exhaust the host.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(1..=16).contains(&self.parallelism) {
            return Err(CoreError::Config(format!(
                "credentials.parallelism out of range: {} (expected 1..16)",
                self.parallelism
            )));
        }
        let min_memory = 8 * self.parallelism;
        if !(min_memory..=1_048_576).contains(&self.memory_cost) {
            return Err(CoreError::Config(format!(
                "credentials.memory_cost out of range: {} KiB (expected {min_memory}..1048576)",
                self.memory_cost
            )));
        }
        if !(1..=20).contains(&self.time_cost) {
            return Err(CoreError::Config(format!(
                "credentials.time_cost out of range: {} (expected 1..20)",
                self.time_cost
            )));
        }
        Ok(())
    }
}

fn hasher(params: &KdfParams) -> Result<Argon2<'static>, CoreError> {
    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        None,
    )
    .map_err(|e| CoreError::Credential(format!("Invalid Argon2 params: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params))
}

/// Hash an account secret into a self-describing PHC string
/// (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).
///
/// A fresh random salt is drawn for every call.
pub fn hash_secret(secret: &str, params: &KdfParams) -> Result<String, CoreError> {
    let salt_bytes = generate_salt()?;
    let salt = SaltString::encode_b64(&salt_bytes)?;
    let hash = hasher(params)?.hash_password(secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a secret against a stored PHC string.
///
/// Returns `Ok(false)` for a mismatch; `Err` only when the stored value is
/// not a usable hash.
pub fn verify_secret(secret: &str, stored: &str) -> Result<bool, CoreError> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Generate cryptographically secure random bytes for a salt.
pub fn generate_salt() -> Result<[u8; 16], CoreError> {
    let mut salt = [0u8; 16];
    getrandom::getrandom(&mut salt)
        .map_err(|e| CoreError::Credential(format!("Failed to generate random salt: {e}")))?;
    Ok(salt)
}
