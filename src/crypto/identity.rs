use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

const NONCE_LEN: usize = 12;

/// The token was malformed, produced under a different key, or tampered with.
/// Callers treat this as "unauthenticated", never as a retryable fault. The
/// message deliberately carries nothing about the token or the key.
#[derive(Debug, Error)]
#[error("identity token could not be decrypted")]
pub struct DecryptionError;

#[derive(Debug, Error)]
#[error("identity token could not be produced")]
pub struct EncryptionError;

/// Reversible codec for the identity header. The caller's email is encrypted
/// by the trusted gateway once at login and decrypted here on every request,
/// standing in for a server-side session store. Pure codec; it knows nothing
/// about accounts.
pub struct IdentityCodec {
    cipher: Aes256Gcm,
}

impl IdentityCodec {
    /// Derives the process-wide 256-bit key from the configured secret. The
    /// key is provisioned once at startup and never rotated at runtime.
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&digest));
        Self { cipher }
    }

    /// Encrypts a plaintext identity into an opaque base64url token of
    /// `nonce || ciphertext`, with a fresh random nonce per call.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, EncryptionError> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| EncryptionError)?;

        let mut token = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        token.extend_from_slice(&nonce);
        token.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(token))
    }

    pub fn decrypt(&self, token: &str) -> Result<String, DecryptionError> {
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| DecryptionError)?;
        if bytes.len() <= NONCE_LEN {
            return Err(DecryptionError);
        }
        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);

        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| DecryptionError)?;

        String::from_utf8(plaintext).map_err(|_| DecryptionError)
    }
}
