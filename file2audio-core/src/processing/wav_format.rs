//! WAV file format utilities.
//!
//! Writes and reads the canonical 44-byte RIFF layout only. There is no
//! chunk walking: a file with any chunk between `fmt ` and `data` is
//! rejected as `UnsupportedContainerLayout` rather than misread.

use crate::models::config::CodecConfiguration;
use crate::models::error::CodecError;

/// Size of the standard WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// Largest data chunk whose RIFF size (`36 + data_size`) still fits in a u32.
pub const MAX_DATA_SIZE: u32 = u32::MAX - 36;

/// Samples and rate recovered from a WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavData {
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

/// Generate a 44-byte WAV RIFF header.
///
/// Format: PCM (format code 1), little-endian.
///
/// Layout:
/// ```text
/// [0-3]    "RIFF"
/// [4-7]    36 + data_size
/// [8-11]   "WAVE"
/// [12-15]  "fmt "
/// [16-19]  16 (PCM format chunk size)
/// [20-21]  1 (PCM format code)
/// [22-23]  channels
/// [24-27]  sample_rate
/// [28-31]  byte_rate = sample_rate * channels * bit_depth / 8
/// [32-33]  block_align = channels * bit_depth / 8
/// [34-35]  bit_depth
/// [36-39]  "data"
/// [40-43]  data_size
/// ```
///
/// Callers must have checked that `byte_rate` and `36 + data_size` fit in u32.
pub fn generate_wav_header(sample_rate: u32, bit_depth: u16, channels: u16, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let byte_rate = sample_rate * channels as u32 * bit_depth as u32 / 8;
    let block_align = channels * bit_depth / 8;
    let chunk_size = 36 + data_size;

    let mut header = [0u8; WAV_HEADER_SIZE];

    // RIFF chunk descriptor
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt sub-chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes()); // PCM format size
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM format code
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&bit_depth.to_le_bytes());

    // data sub-chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    header
}

/// Serialize mono 16-bit samples into a complete WAV file.
pub fn write_wav(samples: &[i16], config: &CodecConfiguration) -> Result<Vec<u8>, CodecError> {
    config.validate()?;

    let data_size = samples
        .len()
        .checked_mul(2)
        .and_then(|size| u32::try_from(size).ok())
        .filter(|size| *size <= MAX_DATA_SIZE)
        .ok_or_else(|| {
            CodecError::CapacityExceeded(format!("{} samples do not fit in a WAV data chunk", samples.len()))
        })?;

    let header = generate_wav_header(config.sample_rate, config.bits_per_sample, config.channels, data_size);

    let mut wav = Vec::with_capacity(WAV_HEADER_SIZE + data_size as usize);
    wav.extend_from_slice(&header);
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    Ok(wav)
}

/// Parse a canonical mono 16-bit WAV file.
///
/// Bytes past the declared data chunk are ignored.
pub fn read_wav(bytes: &[u8]) -> Result<WavData, CodecError> {
    if bytes.len() < WAV_HEADER_SIZE {
        return Err(layout(format!(
            "file is {} bytes, shorter than the {WAV_HEADER_SIZE}-byte header",
            bytes.len()
        )));
    }

    expect_tag(bytes, 0, b"RIFF")?;
    expect_tag(bytes, 8, b"WAVE")?;
    expect_tag(bytes, 12, b"fmt ")?;

    let fmt_size = read_u32_le(bytes, 16);
    if fmt_size != 16 {
        return Err(layout(format!("fmt chunk is {fmt_size} bytes, expected 16")));
    }
    let format_code = read_u16_le(bytes, 20);
    if format_code != 1 {
        return Err(layout(format!("format code {format_code} is not PCM")));
    }
    let channels = read_u16_le(bytes, 22);
    if channels != 1 {
        return Err(layout(format!("{channels} channels, expected mono")));
    }
    let sample_rate = read_u32_le(bytes, 24);
    let bit_depth = read_u16_le(bytes, 34);
    if bit_depth != 16 {
        return Err(layout(format!("bit depth {bit_depth}, expected 16")));
    }

    expect_tag(bytes, 36, b"data")?;

    let data_size = read_u32_le(bytes, 40) as usize;
    if data_size % 2 != 0 {
        return Err(layout(format!("data chunk length {data_size} is odd")));
    }
    let available = bytes.len() - WAV_HEADER_SIZE;
    if data_size > available {
        return Err(layout(format!(
            "data chunk declares {data_size} bytes, only {available} present"
        )));
    }

    let samples = bytes[WAV_HEADER_SIZE..WAV_HEADER_SIZE + data_size]
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Ok(WavData { sample_rate, samples })
}

fn layout(reason: String) -> CodecError {
    CodecError::UnsupportedContainerLayout(reason)
}

fn expect_tag(bytes: &[u8], offset: usize, tag: &[u8; 4]) -> Result<(), CodecError> {
    let found = &bytes[offset..offset + 4];
    if found != tag {
        return Err(layout(format!(
            "expected {:?} at offset {offset}, found {:?}",
            String::from_utf8_lossy(tag),
            String::from_utf8_lossy(found)
        )));
    }
    Ok(())
}

fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}
