use argon2::{password_hash::PasswordHash, Argon2, PasswordHasher, PasswordVerifier};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("password hashing failed")]
pub struct HashError;

/// One-way, internally salted credential hashing. The concrete algorithm is
/// pluggable; `verify` returns false for any mismatch, including digests that
/// do not parse.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, HashError>;
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// Random credential for accounts that never set one themselves (social
/// sign-ups). 256 bits of entropy, so password sign-in on such an account
/// cannot be guessed.
pub fn generate_password() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub struct Argon2CredentialHasher;

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let mut salt = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt);
        let salt = argon2::password_hash::SaltString::encode_b64(&salt).map_err(|_| HashError)?;
        let digest = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|_| HashError)?
            .to_string();
        Ok(digest)
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
