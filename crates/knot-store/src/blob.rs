//! Blob objects: raw file content.

use bytes::Bytes;

/// A blob. The body is uninterpreted bytes; encode and decode are
/// pass-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    body: Bytes,
}

impl Blob {
    /// Creates a blob from raw content.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self { body: body.into() }
    }

    /// The blob's content.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Serializes the body.
    pub fn encode(&self) -> Bytes {
        self.body.clone()
    }

    /// Deserializes a body. Cannot fail: every byte sequence is a blob.
    pub fn decode(body: &[u8]) -> Self {
        Self::new(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_roundtrip() {
        let blob = Blob::new(b"hello".to_vec());
        assert_eq!(Blob::decode(&blob.encode()), blob);
        assert_eq!(blob.body(), b"hello");
    }

    #[test]
    fn empty_blob() {
        let blob = Blob::new(Vec::new());
        assert!(blob.encode().is_empty());
    }

    #[test]
    fn binary_blob_roundtrip() {
        let body: Vec<u8> = (0..=255).collect();
        let blob = Blob::new(body.clone());
        assert_eq!(Blob::decode(&blob.encode()).body(), &body[..]);
    }
}
