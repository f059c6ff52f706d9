use thiserror::Error;

/// Errors produced by the encode/decode pipeline and its components.
///
/// Structural variants carry diagnostic context (offsets, lengths), never
/// password material. `AuthenticationFailure` intentionally carries nothing:
/// a wrong password and a tampered payload must look identical to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("password policy violation: {0}")]
    PasswordPolicyViolation(String),

    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("unsupported container layout: {0}")]
    UnsupportedContainerLayout(String),

    #[error("truncated header: need 9 bytes, got {actual}")]
    TruncatedHeader { actual: usize },

    #[error("truncated payload: header declares {declared} bytes, {available} available")]
    TruncatedPayload { declared: usize, available: usize },

    #[error("malformed archive: {0}")]
    MalformedArchive(String),

    #[error("payload is encrypted and no password was supplied")]
    MissingPassword,

    #[error("invalid ciphertext: need at least 28 bytes, got {actual}")]
    InvalidCiphertext { actual: usize },

    #[error("authentication failed: wrong password or corrupted data")]
    AuthenticationFailure,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("storage error: {0}")]
    Storage(String),
}
