//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use git2::{Commit, IndexAddOption, Oid, Repository, Signature};
use walkdir::WalkDir;

/// `tests/` directory; fixture paths like `./testdata/task/maven/0.1` are relative to it
pub fn tests_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests")
}

/// Copy `tests/testdata` into `dest/testdata`
pub fn copy_testdata(dest: &Path) {
    let src = tests_dir().join("testdata");
    for entry in WalkDir::new(&src).into_iter().filter_map(|e| e.ok()) {
        let rel = entry.path().strip_prefix(&src).unwrap();
        let target = dest.join("testdata").join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// Initialise a repository at `root` and commit everything in it
pub fn git_commit_all(root: &Path, summary: &str) -> Oid {
    let repo = Repository::open(root).or_else(|_| Repository::init(root)).unwrap();
    let mut index = repo.index().unwrap();
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None).unwrap();
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("Catalog Tests", "tests@catalog.dev").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, summary, &tree, &parents)
        .unwrap()
}

/// Annotated tag on HEAD
pub fn git_tag(root: &Path, tag_name: &str) {
    let repo = Repository::open(root).unwrap();
    let obj = repo.revparse_single("HEAD").unwrap();
    let sig = Signature::now("Catalog Tests", "tests@catalog.dev").unwrap();
    repo.tag(tag_name, &obj, &sig, &format!("Release {tag_name}"), false)
        .unwrap();
}

/// Lightweight tag on a specific commit
pub fn git_tag_at(root: &Path, tag_name: &str, commit: Oid) {
    let repo = Repository::open(root).unwrap();
    let obj = repo.find_object(commit, None).unwrap();
    repo.tag_lightweight(tag_name, &obj, false).unwrap();
}
