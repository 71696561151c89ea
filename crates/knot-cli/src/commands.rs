//! CLI command implementations.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use knot_repo::{RepoError, Repository};
use knot_store::{odb, Blob, Object, ObjectId, ObjectType, StoreError};
use thiserror::Error;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("object {id} is a {found}, not a {expected}")]
    WrongType {
        id: String,
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Initialize a new repository.
pub fn init(path: Option<&str>) -> Result<()> {
    let target = path.unwrap_or(".");
    tracing::info!(path = %target, "initializing repository");

    let repo = Repository::init(target)?;
    println!(
        "Initialized empty knot repository in {}",
        repo.knot_dir().display()
    );
    Ok(())
}

/// Hash a file as an object of the given type, storing it when `write` is
/// set. Without `-w` no repository is needed at all.
pub fn hash_object(file: &Path, kind: &str, write: bool) -> Result<()> {
    let kind = ObjectType::parse(kind)?;
    let data = fs::read(file)?;

    let object = match kind {
        ObjectType::Blob => Object::from(Blob::new(data)),
        typed => Object::decode(typed, &data)?,
    };

    let repo = if write {
        Repository::discover(".", true)?
    } else {
        None
    };

    let id = odb::write(&object, repo.as_ref())?;
    println!("{id}");
    Ok(())
}

/// Print a stored object's body to stdout.
pub fn cat_file(kind: &str, id: &str) -> Result<()> {
    let expected = ObjectType::parse(kind)?;
    let id = ObjectId::from_hex(id)?;

    let Some(repo) = Repository::discover(".", true)? else {
        return Err(RepoError::NotFound(".".to_string()).into());
    };

    let object = odb::read(&repo, &id)?;
    if object.kind() != expected {
        return Err(CliError::WrongType {
            id: id.to_hex(),
            expected: expected.as_str(),
            found: object.kind().as_str(),
        });
    }

    std::io::stdout().write_all(&object.encode())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_then_hash_and_read_back() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let file = temp.path().join("note.txt");
        fs::write(&file, b"remember").unwrap();

        // The command-level flow, without going through stdout: hash the
        // file, store it, read it back.
        let object = Object::from(Blob::new(fs::read(&file).unwrap()));
        let id = odb::write(&object, Some(&repo)).unwrap();
        let read_back = odb::read(&repo, &id).unwrap();
        assert_eq!(read_back.encode().as_ref(), b"remember");
    }

    #[test]
    fn wrong_type_is_reported() {
        let err = CliError::WrongType {
            id: "ab".repeat(32),
            expected: "commit",
            found: "blob",
        };
        assert!(err.to_string().contains("not a commit"));
    }
}
