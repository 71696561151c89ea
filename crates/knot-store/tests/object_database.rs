//! End-to-end object database test.
//!
//! Builds a small object graph (blob -> tree -> commit -> tag) inside a
//! freshly bootstrapped repository, then reads everything back through a
//! handle discovered from a nested worktree path.

use std::fs;

use knot_repo::Repository;
use knot_store::{odb, Blob, Commit, EntryMode, Object, ObjectType, Tag, Tree, TreeEntry};
use tempfile::TempDir;

#[test]
fn graph_roundtrip_through_discovered_repo() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();

    let blob = Object::from(Blob::new(b"fn main() {}\n".to_vec()));
    let blob_id = odb::write(&blob, Some(&repo)).unwrap();

    let tree = Object::from(Tree::from_entries(vec![TreeEntry::new(
        EntryMode::Regular,
        "main.rs",
        blob_id,
    )
    .unwrap()]));
    let tree_id = odb::write(&tree, Some(&repo)).unwrap();

    let commit = Object::from(Commit {
        tree: tree_id,
        parents: vec![],
        author: "Alice <alice@example.com> 1700000000 +0000".to_string(),
        committer: "Alice <alice@example.com> 1700000000 +0000".to_string(),
        message: "initial import\n".to_string(),
    });
    let commit_id = odb::write(&commit, Some(&repo)).unwrap();

    let tag = Object::from(Tag {
        target: commit_id,
        target_kind: ObjectType::Commit,
        name: "v0.1.0".to_string(),
        tagger: "Alice <alice@example.com> 1700000000 +0000".to_string(),
        message: "first cut\n".to_string(),
    });
    let tag_id = odb::write(&tag, Some(&repo)).unwrap();

    // Re-resolve the repository from a nested path, the way a command
    // invoked deep inside the worktree would.
    let nested = temp.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();
    let found = Repository::discover(&nested, true).unwrap().unwrap();
    assert_eq!(found.worktree(), repo.worktree());

    for (id, original) in [
        (blob_id, &blob),
        (tree_id, &tree),
        (commit_id, &commit),
        (tag_id, &tag),
    ] {
        let read_back = odb::read(&found, &id).unwrap();
        assert_eq!(read_back.kind(), original.kind());
        assert_eq!(read_back.encode(), original.encode());

        let verified = odb::read_verified(&found, &id).unwrap();
        assert_eq!(verified.encode(), original.encode());
    }

    // The stored graph stays linked: the tag names the commit, the commit
    // names the tree, the tree names the blob.
    match odb::read(&found, &tag_id).unwrap() {
        Object::Tag(tag) => assert_eq!(tag.target, commit_id),
        other => panic!("expected tag, got {:?}", other.kind()),
    }
    match odb::read(&found, &commit_id).unwrap() {
        Object::Commit(commit) => assert_eq!(commit.tree, tree_id),
        other => panic!("expected commit, got {:?}", other.kind()),
    }
    match odb::read(&found, &tree_id).unwrap() {
        Object::Tree(tree) => assert_eq!(tree.entries()[0].id, blob_id),
        other => panic!("expected tree, got {:?}", other.kind()),
    }
}

#[test]
fn identifiers_are_stable_across_repositories() {
    let temp_a = TempDir::new().unwrap();
    let temp_b = TempDir::new().unwrap();
    let repo_a = Repository::init(temp_a.path()).unwrap();
    let repo_b = Repository::init(temp_b.path()).unwrap();

    let object = Object::from(Blob::new(b"same bytes".to_vec()));
    let id_a = odb::write(&object, Some(&repo_a)).unwrap();
    let id_b = odb::write(&object, Some(&repo_b)).unwrap();

    assert_eq!(id_a, id_b);
    assert_eq!(id_a, odb::hash(&object));
}
