//! Byte <-> 16-bit sample packing.
//!
//! Each sample carries two bytes, high byte first, reinterpreted as a
//! signed two's-complement value. This is independent of the little-endian
//! order samples are later stored in inside the WAV data chunk.

/// Pack bytes into samples, appending one zero byte if the length is odd.
///
/// The padding byte is never removed here; the container header's
/// payload length is what excludes it on decode.
pub fn bytes_to_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks(2)
        .map(|pair| match *pair {
            [high, low] => i16::from_be_bytes([high, low]),
            [high] => i16::from_be_bytes([high, 0]),
            _ => unreachable!("chunks(2) yields one or two bytes"),
        })
        .collect()
}

/// Unpack samples back into bytes, two per sample, high byte first.
pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_be_bytes());
    }
    bytes
}
