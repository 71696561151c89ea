//! Content-addressed object storage for Knot.
//!
//! This crate provides the typed object model (commits, trees, tags,
//! blobs), the framed byte form objects are hashed over, and the
//! loose-object database that persists them zlib-compressed under a
//! repository's `objects/` directory.

mod blob;
mod commit;
mod error;
mod object;
pub mod odb;
mod tag;
mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use error::{Result, StoreError};
pub use object::{Object, ObjectId, ObjectType};
pub use tag::Tag;
pub use tree::{EntryMode, Tree, TreeEntry};
