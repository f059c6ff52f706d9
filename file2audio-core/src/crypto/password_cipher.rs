use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Key, Nonce};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::models::config::DEFAULT_KDF_ITERATIONS;
use crate::models::error::CodecError;
use crate::traits::payload_cipher::PayloadCipher;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;
pub const KEY_LEN: usize = 32;

/// Salt and nonce must be present before any ciphertext.
pub const MIN_BLOB_LEN: usize = SALT_LEN + NONCE_LEN;

/// PBKDF2-HMAC-SHA256 key derivation + AES-256-GCM, no associated data.
///
/// Blob format:
/// ```text
/// [16-byte salt] [12-byte nonce] [ciphertext] [16-byte GCM tag]
/// ```
/// Salt and nonce are drawn from the OS RNG on every call, so encrypting
/// the same input twice yields different blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCipher {
    iterations: u32,
}

impl PasswordCipher {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl Default for PasswordCipher {
    fn default() -> Self {
        Self::new(DEFAULT_KDF_ITERATIONS)
    }
}

/// Derive a 256-bit AES key from `password` and `salt`.
///
/// The key is wiped from memory when the returned guard is dropped.
pub fn derive_key(password: &str, salt: &[u8], iterations: u32) -> Result<Zeroizing<[u8; KEY_LEN]>, CodecError> {
    if iterations == 0 {
        return Err(CodecError::KeyDerivation("PBKDF2 iterations must be at least 1".into()));
    }
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, iterations, key.as_mut_slice())
        .map_err(|e| CodecError::KeyDerivation(format!("PBKDF2 failed: {e}")))?;
    Ok(key)
}

impl PayloadCipher for PasswordCipher {
    fn encrypt(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>, CodecError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let key = derive_key(password, &salt, self.iterations)?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        // aes-gcm appends the tag to the ciphertext.
        let ciphertext = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| CodecError::CapacityExceeded("plaintext too large for AES-GCM".into()))?;

        let mut blob = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    fn decrypt(&self, blob: &[u8], password: &str) -> Result<Vec<u8>, CodecError> {
        if blob.len() < MIN_BLOB_LEN {
            return Err(CodecError::InvalidCiphertext { actual: blob.len() });
        }
        if password.is_empty() {
            return Err(CodecError::MissingPassword);
        }

        let (salt, rest) = blob.split_at(SALT_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

        let key = derive_key(password, salt, self.iterations)?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CodecError::AuthenticationFailure)
    }

    fn overhead(&self) -> usize {
        SALT_LEN + NONCE_LEN + TAG_LEN
    }

    fn algorithm(&self) -> &str {
        "PBKDF2-SHA256/AES-256-GCM"
    }
}
