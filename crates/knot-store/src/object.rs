//! Object identifiers, type tags, and the typed object enum.

use crate::{Blob, Commit, Result, StoreError, Tag, Tree};
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// A 32-byte SHA-256 object identifier.
///
/// Computed over an object's framed form (`<tag> <len>\0<body>`), so two
/// objects with identical framed bytes are the same object.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId([u8; 32]);

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObjectId::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl ObjectId {
    /// The length of an identifier in bytes.
    pub const LEN: usize = 32;

    /// Creates an ObjectId from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an ObjectId from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != Self::LEN * 2 {
            return Err(StoreError::InvalidId(format!(
                "expected {} hex characters, got {}",
                Self::LEN * 2,
                hex.len()
            )));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex, &mut bytes)
            .map_err(|e| StoreError::InvalidId(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the lowercase hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Computes the SHA-256 digest of `data`.
    pub fn digest(data: &[u8]) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&Sha256::digest(data));
        Self(bytes)
    }

    /// Computes the identifier of an object body with its framing header,
    /// hashing the same bytes the store persists.
    pub fn hash_object(kind: ObjectType, body: &[u8]) -> Self {
        let header = format!("{} {}\0", kind.as_str(), body.len());
        let mut hasher = Sha256::new();
        hasher.update(header.as_bytes());
        hasher.update(body);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// The closed set of object type tags.
///
/// The framing format hard-codes this vocabulary; there is deliberately no
/// way to extend it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    /// Commit object.
    Commit,
    /// Directory listing.
    Tree,
    /// Annotated tag.
    Tag,
    /// File content.
    Blob,
}

impl ObjectType {
    /// Returns the ASCII tag used in framing.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Tag => "tag",
            Self::Blob => "blob",
        }
    }

    /// Parses a type tag.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "commit" => Ok(Self::Commit),
            "tree" => Ok(Self::Tree),
            "tag" => Ok(Self::Tag),
            "blob" => Ok(Self::Blob),
            _ => Err(StoreError::UnknownType(s.to_string())),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed object: one of commit, tree, tag, or blob.
///
/// Identity is a pure function of the framed form of [`Object::encode`];
/// objects are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// A commit.
    Commit(Commit),
    /// A tree.
    Tree(Tree),
    /// An annotated tag.
    Tag(Tag),
    /// A blob.
    Blob(Blob),
}

impl Object {
    /// The type tag this object is framed and dispatched under.
    pub fn kind(&self) -> ObjectType {
        match self {
            Self::Commit(_) => ObjectType::Commit,
            Self::Tree(_) => ObjectType::Tree,
            Self::Tag(_) => ObjectType::Tag,
            Self::Blob(_) => ObjectType::Blob,
        }
    }

    /// Serializes the object's body. Deterministic: field order, entry
    /// ordering, and whitespace are fixed.
    pub fn encode(&self) -> Bytes {
        match self {
            Self::Commit(commit) => commit.encode(),
            Self::Tree(tree) => tree.encode(),
            Self::Tag(tag) => tag.encode(),
            Self::Blob(blob) => blob.encode(),
        }
    }

    /// Decodes a body under the given type tag.
    ///
    /// # Errors
    ///
    /// `Decode` if the body does not parse as the tagged variant.
    pub fn decode(kind: ObjectType, body: &[u8]) -> Result<Self> {
        Ok(match kind {
            ObjectType::Commit => Self::Commit(Commit::decode(body)?),
            ObjectType::Tree => Self::Tree(Tree::decode(body)?),
            ObjectType::Tag => Self::Tag(Tag::decode(body)?),
            ObjectType::Blob => Self::Blob(Blob::decode(body)),
        })
    }

    /// Computes this object's identifier without storing it.
    pub fn id(&self) -> ObjectId {
        ObjectId::hash_object(self.kind(), &self.encode())
    }
}

impl From<Commit> for Object {
    fn from(commit: Commit) -> Self {
        Self::Commit(commit)
    }
}

impl From<Tree> for Object {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Tag> for Object {
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}

impl From<Blob> for Object {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_hex_roundtrip() {
        let hex = "8aec4e4876f854f688d0ebfc8f37598f38e5fd6903cccc850ca36591175aeb60";
        let id = ObjectId::from_hex(hex).unwrap();
        assert_eq!(id.to_hex(), hex);
    }

    #[test]
    fn object_id_invalid_hex_length() {
        assert!(ObjectId::from_hex("abc").is_err());
        assert!(ObjectId::from_hex(&"ab".repeat(33)).is_err());
    }

    #[test]
    fn object_id_invalid_hex_chars() {
        assert!(ObjectId::from_hex(&"z".repeat(64)).is_err());
    }

    #[test]
    fn object_id_display_and_debug() {
        let id = ObjectId::from_bytes([0u8; 32]);
        assert_eq!(format!("{}", id), "0".repeat(64));
        assert!(format!("{:?}", id).contains(&"0".repeat(64)));
    }

    #[test]
    fn object_id_serialization() {
        let id = ObjectId::from_bytes([0xab; 32]);
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn hash_object_matches_framed_digest() {
        let body = b"hello";
        let framed = b"blob 5\0hello";
        assert_eq!(
            ObjectId::hash_object(ObjectType::Blob, body),
            ObjectId::digest(framed)
        );
    }

    #[test]
    fn blob_hash_known_value() {
        // SHA-256 of "blob 5\0hello"
        let id = ObjectId::hash_object(ObjectType::Blob, b"hello");
        assert_eq!(
            id.to_hex(),
            "8aec4e4876f854f688d0ebfc8f37598f38e5fd6903cccc850ca36591175aeb60"
        );
    }

    #[test]
    fn empty_blob_hash_known_value() {
        // SHA-256 of "blob 0\0"
        let id = ObjectId::hash_object(ObjectType::Blob, b"");
        assert_eq!(
            id.to_hex(),
            "473a0f4c3be8a93681a267e3b1e9a7dcda1185436fe141f7749120a303721813"
        );
    }

    #[test]
    fn object_type_roundtrip() {
        for kind in [
            ObjectType::Commit,
            ObjectType::Tree,
            ObjectType::Tag,
            ObjectType::Blob,
        ] {
            assert_eq!(ObjectType::parse(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn object_type_parse_unknown() {
        assert!(matches!(
            ObjectType::parse("widget"),
            Err(StoreError::UnknownType(_))
        ));
    }

    #[test]
    fn object_kind_dispatch() {
        let object = Object::from(Blob::new(b"data".to_vec()));
        assert_eq!(object.kind(), ObjectType::Blob);
        assert_eq!(object.id(), ObjectId::hash_object(ObjectType::Blob, b"data"));
    }
}
