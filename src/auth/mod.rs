/// Credential gate in front of destructive commands
///
/// A light operator check, not a security boundary. The expected hash is
/// handed in with the run's configuration; nothing is kept in process-wide
/// state.
pub mod kdf;

use kdf::{KEY_LEN, pbkdf2_sha256};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

pub const DEFAULT_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;

/// Stored password verifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CredentialConfig {
    /// Hex-encoded random salt
    pub salt: String,
    /// Hex-encoded PBKDF2-HMAC-SHA256 output
    pub hash: String,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

impl CredentialConfig {
    /// New verifier for `password` with a fresh salt.
    pub fn create(password: &str) -> Result<Self, String> {
        if password.trim().is_empty() {
            return Err("password cannot be empty".to_string());
        }
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill_bytes(&mut salt);
        let hash = pbkdf2_sha256(password.as_bytes(), &salt, DEFAULT_ITERATIONS);
        Ok(Self {
            salt: hex::encode(salt),
            hash: hex::encode(hash),
            iterations: DEFAULT_ITERATIONS,
        })
    }

    /// Check `password` against the stored hash in constant time.
    pub fn verify(&self, password: &str) -> bool {
        let (Ok(salt), Ok(expected)) = (hex::decode(&self.salt), hex::decode(&self.hash)) else {
            return false;
        };
        let actual = pbkdf2_sha256(password.as_bytes(), &salt, self.iterations);
        actual.as_slice().ct_eq(expected.as_slice()).into()
    }

    pub fn validate(&self) -> Result<(), String> {
        let salt = hex::decode(&self.salt).map_err(|e| format!("credential salt is not hex: {}", e))?;
        if salt.is_empty() {
            return Err("credential salt cannot be empty".to_string());
        }
        let hash = hex::decode(&self.hash).map_err(|e| format!("credential hash is not hex: {}", e))?;
        if hash.len() != KEY_LEN {
            return Err(format!("credential hash must be {} bytes", KEY_LEN));
        }
        if self.iterations == 0 {
            return Err("credential iterations must be positive".to_string());
        }
        Ok(())
    }
}
