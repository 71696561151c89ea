//! The loose-object database.
//!
//! Objects live under `objects/<xx>/<rest>` in the repository's metadata
//! directory, keyed by the SHA-256 of their framed form
//! `<tag> <len>\0<body>` and zlib-compressed as a whole. Writes are
//! idempotent: the key is a pure function of the content, so a second
//! write of the same object is a no-op.

use std::fs;
use std::io::{ErrorKind, Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use knot_repo::Repository;

use crate::{Object, ObjectId, ObjectType, Result, StoreError};

fn frame(kind: ObjectType, body: &[u8]) -> Vec<u8> {
    let header = format!("{} {}\0", kind.as_str(), body.len());
    let mut framed = Vec::with_capacity(header.len() + body.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(body);
    framed
}

/// Computes an object's identifier without touching any repository.
pub fn hash(object: &Object) -> ObjectId {
    ObjectId::hash_object(object.kind(), &object.encode())
}

/// Persists `object` into `repo`, or only computes its identifier when no
/// repository handle is given.
///
/// # Errors
///
/// Layout errors from path resolution and `Io` on write or compression
/// failure.
pub fn write(object: &Object, repo: Option<&Repository>) -> Result<ObjectId> {
    let body = object.encode();
    let framed = frame(object.kind(), &body);
    let id = ObjectId::digest(&framed);

    let Some(repo) = repo else {
        return Ok(id);
    };

    let hex = id.to_hex();
    let (fanout, rest) = hex.split_at(2);
    repo.knot_subdir(true, &["objects", fanout])?;
    let path = repo.knot_path(&["objects", fanout, rest]);

    if path.exists() {
        tracing::debug!(id = %hex, "object already present");
        return Ok(id);
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&framed)?;
    let compressed = encoder.finish()?;
    fs::write(&path, compressed)?;
    tracing::debug!(id = %hex, kind = %object.kind(), bytes = framed.len(), "wrote object");

    Ok(id)
}

/// Reads the object named by `id` from `repo`.
///
/// # Errors
///
/// `ObjectNotFound` if the identifier names nothing, `Malformed` if the
/// framing is structurally broken, `UnknownType` for a tag outside the
/// closed set, `Decode` if the body does not parse.
pub fn read(repo: &Repository, id: &ObjectId) -> Result<Object> {
    let framed = read_framed(repo, id)?;
    let (kind, body) = parse_frame(&framed)?;
    Object::decode(kind, body)
}

/// Like [`read`], but re-hashes the framed bytes and fails with
/// [`StoreError::IdMismatch`] when the digest does not reproduce `id`.
///
/// The structural length check in [`read`] catches truncation; this
/// additionally catches content that was swapped or bit-flipped on disk.
///
/// # Errors
///
/// Everything [`read`] can fail with, plus `IdMismatch`.
pub fn read_verified(repo: &Repository, id: &ObjectId) -> Result<Object> {
    let framed = read_framed(repo, id)?;
    let actual = ObjectId::digest(&framed);
    if actual != *id {
        return Err(StoreError::IdMismatch {
            expected: id.to_hex(),
            found: actual.to_hex(),
        });
    }
    let (kind, body) = parse_frame(&framed)?;
    Object::decode(kind, body)
}

fn read_framed(repo: &Repository, id: &ObjectId) -> Result<Vec<u8>> {
    let hex = id.to_hex();
    let (fanout, rest) = hex.split_at(2);

    let path = repo
        .knot_file(false, &["objects", fanout, rest])?
        .ok_or_else(|| StoreError::ObjectNotFound(hex.clone()))?;

    let file = match fs::File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(StoreError::ObjectNotFound(hex));
        }
        Err(e) => return Err(e.into()),
    };

    let mut framed = Vec::new();
    ZlibDecoder::new(file).read_to_end(&mut framed)?;
    tracing::debug!(id = %hex, bytes = framed.len(), "read object");
    Ok(framed)
}

fn parse_frame(framed: &[u8]) -> Result<(ObjectType, &[u8])> {
    let space = framed
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| StoreError::Malformed("missing space after type tag".to_string()))?;

    let nul = framed[space..]
        .iter()
        .position(|&b| b == 0)
        .map(|i| i + space)
        .ok_or_else(|| StoreError::Malformed("missing NUL after length field".to_string()))?;

    let declared: usize = std::str::from_utf8(&framed[space + 1..nul])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            StoreError::Malformed("length field is not a decimal integer".to_string())
        })?;

    let body = &framed[nul + 1..];
    if declared != body.len() {
        return Err(StoreError::Malformed(format!(
            "bad length: header declares {declared} bytes, body has {}",
            body.len()
        )));
    }

    let tag = std::str::from_utf8(&framed[..space])
        .map_err(|_| StoreError::Malformed("type tag is not UTF-8".to_string()))?;
    let kind = ObjectType::parse(tag)?;

    Ok((kind, body))
}
