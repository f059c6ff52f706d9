//! The 9-byte prefix written in front of the (possibly encrypted) archive.
//!
//! Layout:
//! ```text
//! [0-3]  file count       (u32, big-endian)
//! [4-7]  payload length   (u32, big-endian)
//! [8]    encrypted flag   (0 or 1)
//! [9..]  payload
//! ```
//! `payload_length` is what lets decode drop the zero byte the PCM codec
//! appends to odd-length buffers. The header is not covered by the AEAD tag.

use crate::models::error::CodecError;

/// Size of the container header in bytes.
pub const CONTAINER_HEADER_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub file_count: u32,
    pub payload_length: u32,
    pub encrypted: bool,
}

impl ContainerHeader {
    pub fn new(file_count: u32, payload_length: u32, encrypted: bool) -> Self {
        Self {
            file_count,
            payload_length,
            encrypted,
        }
    }

    /// Serialize to the fixed 9-byte layout.
    pub fn build(&self) -> [u8; CONTAINER_HEADER_SIZE] {
        let mut header = [0u8; CONTAINER_HEADER_SIZE];
        header[0..4].copy_from_slice(&self.file_count.to_be_bytes());
        header[4..8].copy_from_slice(&self.payload_length.to_be_bytes());
        header[8] = u8::from(self.encrypted);
        header
    }

    /// Parse the header and return it with exactly `payload_length` bytes of payload.
    ///
    /// Bytes beyond the declared payload (PCM padding) are discarded.
    /// Any non-zero flag byte is treated as encrypted.
    pub fn parse(bytes: &[u8]) -> Result<(Self, &[u8]), CodecError> {
        if bytes.len() < CONTAINER_HEADER_SIZE {
            return Err(CodecError::TruncatedHeader { actual: bytes.len() });
        }
        let header = Self {
            file_count: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            payload_length: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            encrypted: bytes[8] != 0,
        };

        let declared = header.payload_length as usize;
        let available = bytes.len() - CONTAINER_HEADER_SIZE;
        if declared > available {
            return Err(CodecError::TruncatedPayload { declared, available });
        }
        Ok((header, &bytes[CONTAINER_HEADER_SIZE..CONTAINER_HEADER_SIZE + declared]))
    }
}
