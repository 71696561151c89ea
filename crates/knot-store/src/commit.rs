//! Commit objects.

use bytes::Bytes;

use crate::{ObjectId, Result, StoreError};

/// A commit: a tree snapshot plus ancestry and authorship headers.
///
/// The body layout is fixed: a `tree` line, zero or more `parent` lines,
/// `author`, `committer`, a blank line, then the message. Identity lines
/// are carried verbatim; the core does not interpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The tree this commit snapshots.
    pub tree: ObjectId,
    /// Parent commits, in order. Empty for a root commit.
    pub parents: Vec<ObjectId>,
    /// Author identity line.
    pub author: String,
    /// Committer identity line.
    pub committer: String,
    /// Commit message.
    pub message: String,
}

impl Commit {
    /// Serializes the commit body.
    pub fn encode(&self) -> Bytes {
        let mut content = format!("tree {}\n", self.tree);
        for parent in &self.parents {
            content.push_str(&format!("parent {parent}\n"));
        }
        content.push_str(&format!("author {}\n", self.author));
        content.push_str(&format!("committer {}\n", self.committer));
        content.push('\n');
        content.push_str(&self.message);
        Bytes::from(content.into_bytes())
    }

    /// Parses a commit body.
    ///
    /// # Errors
    ///
    /// `Decode` on any deviation from the fixed header layout.
    pub fn decode(body: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(body)
            .map_err(|_| decode_err("body is not UTF-8"))?;
        let (headers, message) = text
            .split_once("\n\n")
            .ok_or_else(|| decode_err("missing blank line before message"))?;

        let mut lines = headers.lines().peekable();

        let tree = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .ok_or_else(|| decode_err("expected tree header"))?;
        let tree = ObjectId::from_hex(tree).map_err(|_| decode_err("malformed tree id"))?;

        let mut parents = Vec::new();
        while let Some(hex) = lines.peek().and_then(|line| line.strip_prefix("parent ")) {
            let parent = ObjectId::from_hex(hex).map_err(|_| decode_err("malformed parent id"))?;
            parents.push(parent);
            lines.next();
        }

        let author = lines
            .next()
            .and_then(|line| line.strip_prefix("author "))
            .ok_or_else(|| decode_err("expected author header"))?
            .to_string();
        let committer = lines
            .next()
            .and_then(|line| line.strip_prefix("committer "))
            .ok_or_else(|| decode_err("expected committer header"))?
            .to_string();

        if lines.next().is_some() {
            return Err(decode_err("unexpected header after committer"));
        }

        Ok(Self {
            tree,
            parents,
            author,
            committer,
            message: message.to_string(),
        })
    }
}

fn decode_err(msg: &str) -> StoreError {
    StoreError::Decode(format!("commit: {msg}"))
}
