use crate::models::error::CodecError;

/// Default sample rate in Hz.
///
/// Deliberately far above audible needs: it maximizes bytes carried per
/// second of "audio", not fidelity.
pub const DEFAULT_SAMPLE_RATE: u32 = 202_860;

/// PBKDF2-HMAC-SHA256 iteration count used by the interoperable format.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Minimum password length (in characters) accepted for encryption.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 8;

/// Configuration for a codec pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfiguration {
    /// Sample rate written into the WAV header (default: 202860).
    /// Decoding ignores this and uses whatever rate the file declares.
    pub sample_rate: u32,

    /// Bit depth for PCM output. Only 16 is supported.
    pub bits_per_sample: u16,

    /// Number of output channels. Only mono is supported.
    pub channels: u16,

    /// PBKDF2 iterations for both encryption and decryption (default: 100000).
    pub kdf_iterations: u32,

    /// Minimum password length enforced before encoding (default: 8).
    pub min_password_len: usize,
}

impl CodecConfiguration {
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.sample_rate == 0 {
            return Err(CodecError::InvalidConfiguration("sample rate must be positive".into()));
        }
        if self.bits_per_sample != 16 {
            return Err(CodecError::InvalidConfiguration(format!(
                "unsupported bit depth: {}",
                self.bits_per_sample
            )));
        }
        if self.channels != 1 {
            return Err(CodecError::InvalidConfiguration(format!(
                "unsupported channel count: {}",
                self.channels
            )));
        }
        if self.kdf_iterations == 0 {
            return Err(CodecError::InvalidConfiguration("KDF iterations must be at least 1".into()));
        }
        if self.byte_rate().is_none() {
            return Err(CodecError::InvalidConfiguration(format!(
                "sample rate {} overflows the WAV byte-rate field",
                self.sample_rate
            )));
        }
        Ok(())
    }

    /// Block alignment in bytes (channels * bytes per sample).
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes per second of audio, or `None` if it does not fit the 32-bit header field.
    pub fn byte_rate(&self) -> Option<u32> {
        self.sample_rate.checked_mul(u32::from(self.block_align()))
    }
}

impl Default for CodecConfiguration {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bits_per_sample: 16,
            channels: 1,
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
        }
    }
}
