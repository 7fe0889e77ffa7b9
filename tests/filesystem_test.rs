//! Tests for the real FileSystem implementation

use std::fs;

use tempfile::TempDir;

use linktree::infrastructure::traits::{FileSystem, RealFileSystem};

#[test]
fn given_nested_path_when_ensure_parent_then_creates_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a").join("b").join("links.toml");

    RealFileSystem.ensure_parent(&path).unwrap();

    assert!(temp.path().join("a").join("b").is_dir());
    assert!(!path.exists());
}

#[test]
fn given_bare_file_name_when_ensure_parent_then_is_noop() {
    RealFileSystem
        .ensure_parent(std::path::Path::new("links.toml"))
        .unwrap();
}

#[test]
fn given_existing_file_when_write_atomic_then_replaces_content() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("links.toml");
    fs::write(&path, "old content that is longer").unwrap();

    RealFileSystem.write_atomic(&path, "new").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1, "temp file should be renamed into place");
}

#[test]
fn given_new_file_when_write_atomic_then_creates_it() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("links.toml");
    let fs_impl = RealFileSystem;

    fs_impl.write_atomic(&path, "version = \"links-v1\"\n").unwrap();

    assert!(fs_impl.is_file(&path));
    assert!(fs_impl.exists(&path));
    assert_eq!(
        fs_impl.read_to_string(&path).unwrap(),
        "version = \"links-v1\"\n"
    );
}

#[test]
fn given_directory_when_is_file_then_false() {
    let temp = TempDir::new().unwrap();

    assert!(RealFileSystem.exists(temp.path()));
    assert!(!RealFileSystem.is_file(temp.path()));
}
