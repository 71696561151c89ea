//! Tree objects: directory listings.

use bytes::Bytes;

use crate::{ObjectId, Result, StoreError};

/// File mode of a tree entry, stored as the entry's ASCII octal field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// Regular file (`100644`).
    Regular,
    /// Executable file (`100755`).
    Executable,
    /// Symbolic link (`120000`).
    Symlink,
    /// Subdirectory (`40000`).
    Directory,
}

impl EntryMode {
    /// Returns the octal string stored in the entry record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "100644",
            Self::Executable => "100755",
            Self::Symlink => "120000",
            Self::Directory => "40000",
        }
    }

    /// Parses an octal mode field.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "100644" => Ok(Self::Regular),
            "100755" => Ok(Self::Executable),
            "120000" => Ok(Self::Symlink),
            "40000" => Ok(Self::Directory),
            _ => Err(decode_err(&format!("unknown entry mode {s:?}"))),
        }
    }
}

/// One name-to-object binding inside a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Entry file mode.
    pub mode: EntryMode,
    /// Entry name. A single path component: never empty, no `/`, no NUL.
    pub name: String,
    /// The object the entry points at.
    pub id: ObjectId,
}

impl TreeEntry {
    /// Creates an entry, validating the name.
    ///
    /// # Errors
    ///
    /// `Decode` if the name is empty or contains `/` or NUL.
    pub fn new(mode: EntryMode, name: impl Into<String>, id: ObjectId) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { mode, name, id })
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(decode_err("empty entry name"));
    }
    if name.contains('/') {
        return Err(decode_err(&format!("entry name {name:?} contains '/'")));
    }
    if name.contains('\0') {
        return Err(decode_err(&format!("entry name {name:?} contains NUL")));
    }
    Ok(())
}

/// A tree: a list of entries, held in encoding order.
///
/// Entries are sorted by name at construction so that [`Tree::encode`] is
/// a pure function of the entry set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Creates a tree from entries, sorting them by name.
    pub fn from_entries(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }

    /// The entries in encoding order.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Serializes entries as consecutive `<mode> <name>\0<raw id>` records.
    pub fn encode(&self) -> Bytes {
        let mut out = Vec::new();
        for entry in &self.entries {
            out.extend_from_slice(entry.mode.as_str().as_bytes());
            out.push(b' ');
            out.extend_from_slice(entry.name.as_bytes());
            out.push(0);
            out.extend_from_slice(entry.id.as_bytes());
        }
        Bytes::from(out)
    }

    /// Parses entry records.
    ///
    /// # Errors
    ///
    /// `Decode` on truncated records, invalid names, or unknown modes.
    pub fn decode(body: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut rest = body;

        while !rest.is_empty() {
            let space = rest
                .iter()
                .position(|&b| b == b' ')
                .ok_or_else(|| decode_err("entry missing space after mode"))?;
            let mode = std::str::from_utf8(&rest[..space])
                .map_err(|_| decode_err("entry mode is not ASCII"))?;
            let mode = EntryMode::parse(mode)?;

            let after_mode = &rest[space + 1..];
            let nul = after_mode
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| decode_err("entry missing NUL after name"))?;
            let name = std::str::from_utf8(&after_mode[..nul])
                .map_err(|_| decode_err("entry name is not UTF-8"))?;
            validate_name(name)?;

            let id_bytes = after_mode
                .get(nul + 1..nul + 1 + ObjectId::LEN)
                .ok_or_else(|| decode_err("truncated entry id"))?;
            let mut raw = [0u8; ObjectId::LEN];
            raw.copy_from_slice(id_bytes);

            entries.push(TreeEntry {
                mode,
                name: name.to_string(),
                id: ObjectId::from_bytes(raw),
            });
            rest = &after_mode[nul + 1 + ObjectId::LEN..];
        }

        Ok(Self { entries })
    }
}

fn decode_err(msg: &str) -> StoreError {
    StoreError::Decode(format!("tree: {msg}"))
}
