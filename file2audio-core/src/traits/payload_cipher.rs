use crate::models::error::CodecError;

/// Password-based authenticated encryption of an opaque payload.
///
/// Default implementation is [`PasswordCipher`](crate::crypto::password_cipher::PasswordCipher)
/// (PBKDF2-HMAC-SHA256 + AES-256-GCM).
///
/// Implementations must:
/// - use fresh randomness on every `encrypt` call;
/// - return `AuthenticationFailure` (never plaintext) when the tag does not verify.
pub trait PayloadCipher: Send + Sync {
    /// Returns the self-describing encrypted blob (salt, nonce, ciphertext, tag).
    fn encrypt(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>, CodecError>;

    /// Inverse of `encrypt`.
    fn decrypt(&self, blob: &[u8], password: &str) -> Result<Vec<u8>, CodecError>;

    /// Bytes `encrypt` adds to the plaintext length.
    fn overhead(&self) -> usize;

    /// Algorithm identifier (e.g., "PBKDF2-SHA256/AES-256-GCM").
    fn algorithm(&self) -> &str;
}
