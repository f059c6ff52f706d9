//! # file2audio-core
//!
//! Turns an arbitrary set of named files into a mono 16-bit WAV file and back,
//! optionally protecting the payload with password-based AES-256-GCM.
//!
//! Everything here is synchronous and in-memory. Presentation, file picking
//! and delivery belong to callers (see `file2audio-cli`), which only hand
//! byte buffers and names to [`Pipeline`].
//!
//! ## Architecture
//!
//! ```text
//! file2audio-core (this crate)
//! ├── models/       ← CodecError, CodecConfiguration, NamedBlob, PasswordEntry, reports
//! ├── processing/   ← archive codec, 9-byte container header, PCM packing, WAV format
//! ├── traits/       ← PayloadCipher
//! ├── crypto/       ← PasswordCipher (PBKDF2-HMAC-SHA256 + AES-256-GCM)
//! ├── session/      ← Pipeline (encode / decode / inspect)
//! └── storage/      ← loading and safely writing file sets, SHA-256 checksums
//! ```
//!
//! ## Wire format
//!
//! ```text
//! WAV data = pcm( header(9) ++ payload ++ [pad] )
//! payload  = archive | salt(16) ++ nonce(12) ++ ciphertext ++ tag(16)
//! ```
//!
//! The container header is not covered by the GCM tag.

pub mod crypto;
pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use crypto::password_cipher::PasswordCipher;
pub use models::config::{CodecConfiguration, DEFAULT_KDF_ITERATIONS, DEFAULT_MIN_PASSWORD_LEN, DEFAULT_SAMPLE_RATE};
pub use models::error::CodecError;
pub use models::named_blob::NamedBlob;
pub use models::password::PasswordEntry;
pub use models::report::{ContainerInfo, EncodeOutcome, EncodeReport};
pub use processing::container_header::ContainerHeader;
pub use processing::wav_format::WavData;
pub use session::pipeline::Pipeline;
pub use traits::payload_cipher::PayloadCipher;
