use sitepath_fs::{EntryKind, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.sitepath");

    io::write_atomic(&path, b"hello world").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.sitepath");
    fs::write(&path, "original").unwrap();

    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    io::write_atomic(&temp.path().join("x.sitepath"), b"{}").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "found {:?}", leftovers);
}

#[test]
fn test_write_atomic_requires_existing_parent() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing").join("x.sitepath");

    assert!(io::write_atomic(&path, b"{}").is_err());
    assert!(!temp.path().join("missing").exists());
}

#[test]
fn test_read_text_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    assert!(io::read_text(&temp.path().join("nope")).is_err());
}

#[test]
fn test_copy_entry_copies_tree() {
    let temp = TempDir::new().unwrap();
    let origin = temp.path().join("pkg");
    fs::create_dir_all(origin.join("sub")).unwrap();
    fs::write(origin.join("__init__.py"), "x = 1").unwrap();
    fs::write(origin.join("sub").join("mod.py"), "y = 2").unwrap();

    let dest = temp.path().join("copy");
    io::copy_entry(&origin, &dest).unwrap();

    assert_eq!(fs::read_to_string(dest.join("__init__.py")).unwrap(), "x = 1");
    assert_eq!(
        fs::read_to_string(dest.join("sub").join("mod.py")).unwrap(),
        "y = 2"
    );
}

#[test]
fn test_copy_entry_copies_single_file() {
    let temp = TempDir::new().unwrap();
    let origin = temp.path().join("my_file.py");
    fs::write(&origin, "file=True").unwrap();

    let dest = temp.path().join("out.py");
    io::copy_entry(&origin, &dest).unwrap();

    assert_eq!(fs::read_to_string(dest).unwrap(), "file=True");
}

#[test]
fn test_remove_entry_handles_tree_and_absent() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("tree");
    fs::create_dir_all(dir.join("a").join("b")).unwrap();
    fs::write(dir.join("a").join("b").join("c.txt"), "c").unwrap();

    io::remove_entry(&dir).unwrap();
    assert_eq!(EntryKind::of(&dir).unwrap(), EntryKind::Absent);

    io::remove_entry(&dir).unwrap();
}

#[cfg(unix)]
#[test]
fn test_remove_entry_unlinks_symlink_without_following() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("target");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep.txt"), "keep").unwrap();
    let link = temp.path().join("link");
    io::create_symlink(&target, &link).unwrap();

    io::remove_entry(&link).unwrap();

    assert_eq!(EntryKind::of(&link).unwrap(), EntryKind::Absent);
    assert!(target.join("keep.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_create_symlink_points_at_origin() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("pkg");
    fs::create_dir(&target).unwrap();
    let link = temp.path().join("pkg_link");

    io::create_symlink(&target, &link).unwrap();

    assert_eq!(fs::read_link(&link).unwrap(), target);
    assert_eq!(EntryKind::of(&link).unwrap(), EntryKind::Symlink);
}
