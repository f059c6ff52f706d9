/// A named file carried through the pipeline.
///
/// Order within a set is the only identity a file has; names are not
/// required to be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBlob {
    pub name: String,
    pub data: Vec<u8>,
}

impl NamedBlob {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Bytes this entry occupies in a serialized archive.
    pub fn archived_len(&self) -> usize {
        8 + self.name.len() + self.data.len()
    }
}
