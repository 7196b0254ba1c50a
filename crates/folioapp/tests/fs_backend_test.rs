use folioapp::model::{FolderRecord, LinkType, NodeType};
use folioapp::store::backend::{FolderTable, StorageBackend};
use folioapp::store::fs::FileFolderStore;
use folioapp::store::fs_backend::{FsBackend, FOLDERS_FILE};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

fn assert_no_tmp_files(dir: &TempDir) {
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_missing_file_is_empty() {
    let (_dir, backend) = setup();
    assert!(backend.load_records().unwrap().is_empty());
}

#[test]
fn test_fs_backend_round_trip_and_atomic_write() {
    let (dir, backend) = setup();

    let mut table = FolderTable::new();
    table.insert(
        "f1".into(),
        FolderRecord::folder("f1".into(), None, "Work".into(), "a0".into()),
    );
    backend.save_records(&table).unwrap();

    assert!(dir.path().join(FOLDERS_FILE).exists());
    assert_eq!(backend.location(), dir.path().join(FOLDERS_FILE));
    assert_no_tmp_files(&dir);
    assert_eq!(backend.load_records().unwrap(), table);
}

#[test]
fn test_fs_backend_empty_file_is_empty_table() {
    let (dir, backend) = setup();
    fs::write(dir.path().join(FOLDERS_FILE), "  \n").unwrap();
    assert!(backend.load_records().unwrap().is_empty());
}

#[test]
fn test_fs_backend_corrupt_file_is_an_error() {
    let (dir, backend) = setup();
    fs::write(dir.path().join(FOLDERS_FILE), "{ not json").unwrap();
    assert!(backend.load_records().is_err());
}

#[test]
fn test_fs_backend_failed_rename_leaves_no_tmp_file() {
    let (dir, backend) = setup();
    // A non-empty directory where the table should go makes the rename fail
    let blocker = dir.path().join(FOLDERS_FILE);
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), "x").unwrap();

    assert!(backend.save_records(&FolderTable::new()).is_err());
    assert_no_tmp_files(&dir);
}

#[test]
fn test_fs_backend_creates_missing_root() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let backend = FsBackend::new(nested.clone());
    backend.save_records(&FolderTable::new()).unwrap();
    assert!(nested.join(FOLDERS_FILE).exists());
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let (work, link) = {
        let store = FileFolderStore::open(dir.path().to_path_buf());
        let work = store.create_folder(None, "Work").unwrap();
        let link = store.create_link(&work, LinkType::Collection, "c1").unwrap();
        (work, link)
    };

    let store = FileFolderStore::open(dir.path().to_path_buf());
    let children = store.watch_node_children(Some(&work)).unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, link);
    assert_eq!(children[0].node_type, NodeType::Collection);
    assert_eq!(children[0].data, "c1");

    // On-disk shape uses the camelCase field names
    let raw = fs::read_to_string(dir.path().join(FOLDERS_FILE)).unwrap();
    assert!(raw.contains("\"parentId\""));
    assert!(raw.contains("\"type\": \"collection\""));
}
