use super::folder_store::FolderStore;
use super::fs_backend::FsBackend;
use std::path::PathBuf;

/// Folder store persisted to `folders.json` under a data directory.
pub type FileFolderStore = FolderStore<FsBackend>;

impl FileFolderStore {
    pub fn open(root: PathBuf) -> Self {
        FolderStore::with_backend(FsBackend::new(root))
    }
}
