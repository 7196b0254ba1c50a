use super::backend::{FolderTable, StorageBackend};
use crate::error::{FolioError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const FOLDERS_FILE: &str = "folders.json";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn data_file(&self) -> PathBuf {
        self.root.join(FOLDERS_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FolioError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_records(&self) -> Result<FolderTable> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(FolderTable::new());
        }
        let content = fs::read_to_string(data_file).map_err(FolioError::Io)?;
        if content.trim().is_empty() {
            tracing::warn!(path = %self.data_file().display(), "empty folder table, treating as new");
            return Ok(FolderTable::new());
        }
        let records: FolderTable =
            serde_json::from_str(&content).map_err(FolioError::Serialization)?;
        Ok(records)
    }

    fn save_records(&self, records: &FolderTable) -> Result<()> {
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(records).map_err(FolioError::Serialization)?;

        // Atomic write
        let tmp_file = self.root.join(format!(".folders-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_file, content)
            .and_then(|_| fs::rename(&tmp_file, self.data_file()))
        {
            let _ = fs::remove_file(&tmp_file);
            return Err(FolioError::Io(e));
        }

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.data_file()
    }
}
