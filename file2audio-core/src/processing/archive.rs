//! Multi-file archive codec.
//!
//! Layout (all integers big-endian u32):
//! ```text
//! [count]
//! repeated count times:
//!   [name_len] [name bytes (UTF-8)] [data_len] [data bytes]
//! ```
//! The serialized length is exactly `4 + sum(8 + name_len + data_len)`.

use crate::models::error::CodecError;
use crate::models::named_blob::NamedBlob;

/// Size of the leading file-count field.
pub const COUNT_FIELD_SIZE: usize = 4;

/// Serialized length of `files`, or `CapacityExceeded` if it cannot be
/// described by the 32-bit length fields used downstream.
pub fn archived_len(files: &[NamedBlob]) -> Result<usize, CodecError> {
    let mut total = COUNT_FIELD_SIZE as u64;
    for (index, file) in files.iter().enumerate() {
        if u32::try_from(file.name.len()).is_err() {
            return Err(CodecError::CapacityExceeded(format!(
                "name of file {index} is {} bytes",
                file.name.len()
            )));
        }
        if u32::try_from(file.data.len()).is_err() {
            return Err(CodecError::CapacityExceeded(format!(
                "file {index} ({}) is {} bytes",
                file.name,
                file.data.len()
            )));
        }
        total += file.archived_len() as u64;
    }
    if total > u64::from(u32::MAX) {
        return Err(CodecError::CapacityExceeded(format!(
            "archive would be {total} bytes, limit is {}",
            u32::MAX
        )));
    }
    Ok(total as usize)
}

/// Pack an ordered set of files into one buffer.
pub fn pack(files: &[NamedBlob]) -> Result<Vec<u8>, CodecError> {
    let count = u32::try_from(files.len())
        .map_err(|_| CodecError::CapacityExceeded(format!("{} files exceed the u32 count field", files.len())))?;
    let total = archived_len(files)?;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&count.to_be_bytes());
    for file in files {
        // Lengths were range-checked by archived_len.
        out.extend_from_slice(&(file.name.len() as u32).to_be_bytes());
        out.extend_from_slice(file.name.as_bytes());
        out.extend_from_slice(&(file.data.len() as u32).to_be_bytes());
        out.extend_from_slice(&file.data);
    }
    debug_assert_eq!(out.len(), total);
    Ok(out)
}

/// Unpack a buffer produced by [`pack`].
///
/// Every declared length is bounds-checked; the buffer must be consumed
/// exactly, so trailing bytes are an error too.
pub fn unpack(bytes: &[u8]) -> Result<Vec<NamedBlob>, CodecError> {
    let mut reader = Reader { bytes, pos: 0 };
    let count = reader.read_u32("file count")?;

    // Each entry needs at least 8 bytes; don't trust `count` for allocation.
    let mut files = Vec::with_capacity((count as usize).min(reader.remaining() / 8));
    for index in 0..count {
        let name_len = reader.read_u32("name length")? as usize;
        let name_bytes = reader.take(name_len, "name")?;
        let name = String::from_utf8(name_bytes.to_vec())
            .map_err(|_| CodecError::MalformedArchive(format!("name of entry {index} is not valid UTF-8")))?;
        let data_len = reader.read_u32("data length")? as usize;
        let data = reader.take(data_len, "data")?.to_vec();
        files.push(NamedBlob { name, data });
    }

    if reader.remaining() != 0 {
        return Err(CodecError::MalformedArchive(format!(
            "{} trailing bytes after {count} entries",
            reader.remaining()
        )));
    }
    Ok(files)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8], CodecError> {
        if len > self.remaining() {
            return Err(CodecError::MalformedArchive(format!(
                "{what} at offset {} declares {len} bytes, only {} remain",
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u32(&mut self, what: &str) -> Result<u32, CodecError> {
        let b = self.take(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}
