use serde::{Deserialize, Serialize};

use crate::models::error::CodecError;

/// Summary of a completed encode, suitable for display or JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeReport {
    pub file_count: u32,
    /// Sum of the input files' data lengths.
    pub original_size: u64,
    /// Length of the archive (or encrypted blob) recorded in the container header.
    pub payload_length: u32,
    pub encrypted: bool,
    pub sample_count: u64,
    pub sample_rate: u32,
    pub duration_secs: f64,
    /// Total size of the WAV file including its header.
    pub audio_size: u64,
    /// `original_size / audio_size` as a percentage.
    pub efficiency_percent: f64,
    /// Lower-case hex SHA-256 of the WAV bytes.
    pub checksum: String,
}

/// An encoded WAV file together with its report.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOutcome {
    pub audio: Vec<u8>,
    pub report: EncodeReport,
}

/// What can be learned about an encoded WAV without a password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub sample_rate: u32,
    pub sample_count: u64,
    pub duration_secs: f64,
    pub file_count: u32,
    pub payload_length: u32,
    pub encrypted: bool,
}

/// Seconds of audio represented by `sample_count` mono samples.
pub fn duration_secs(sample_count: u64, sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    sample_count as f64 / f64::from(sample_rate)
}

pub fn efficiency_percent(original_size: u64, audio_size: u64) -> f64 {
    if audio_size == 0 {
        return 0.0;
    }
    original_size as f64 / audio_size as f64 * 100.0
}

impl EncodeReport {
    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CodecError::Storage(format!("failed to serialize report: {}", e)))
    }
}

impl ContainerInfo {
    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CodecError::Storage(format!("failed to serialize container info: {}", e)))
    }
}
