//! Annotated tag objects.

use bytes::Bytes;

use crate::{ObjectId, ObjectType, Result, StoreError};

/// An annotated tag: a named, attributed pointer at another object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The object being tagged.
    pub target: ObjectId,
    /// Type tag of the object being tagged.
    pub target_kind: ObjectType,
    /// The tag name.
    pub name: String,
    /// Tagger identity line, carried verbatim.
    pub tagger: String,
    /// Tag message.
    pub message: String,
}

impl Tag {
    /// Serializes the tag body.
    pub fn encode(&self) -> Bytes {
        let content = format!(
            "object {}\ntype {}\ntag {}\ntagger {}\n\n{}",
            self.target, self.target_kind, self.name, self.tagger, self.message
        );
        Bytes::from(content.into_bytes())
    }

    /// Parses a tag body.
    ///
    /// # Errors
    ///
    /// `Decode` on any deviation from the fixed header layout.
    pub fn decode(body: &[u8]) -> Result<Self> {
        let text =
            std::str::from_utf8(body).map_err(|_| decode_err("body is not UTF-8"))?;
        let (headers, message) = text
            .split_once("\n\n")
            .ok_or_else(|| decode_err("missing blank line before message"))?;

        let mut lines = headers.lines();

        let target = lines
            .next()
            .and_then(|line| line.strip_prefix("object "))
            .ok_or_else(|| decode_err("expected object header"))?;
        let target =
            ObjectId::from_hex(target).map_err(|_| decode_err("malformed object id"))?;

        let target_kind = lines
            .next()
            .and_then(|line| line.strip_prefix("type "))
            .ok_or_else(|| decode_err("expected type header"))?;
        let target_kind = ObjectType::parse(target_kind)
            .map_err(|_| decode_err("unknown target type"))?;

        let name = lines
            .next()
            .and_then(|line| line.strip_prefix("tag "))
            .ok_or_else(|| decode_err("expected tag header"))?
            .to_string();
        let tagger = lines
            .next()
            .and_then(|line| line.strip_prefix("tagger "))
            .ok_or_else(|| decode_err("expected tagger header"))?
            .to_string();

        if lines.next().is_some() {
            return Err(decode_err("unexpected header after tagger"));
        }

        Ok(Self {
            target,
            target_kind,
            name,
            tagger,
            message: message.to_string(),
        })
    }
}

fn decode_err(msg: &str) -> StoreError {
    StoreError::Decode(format!("tag: {msg}"))
}
