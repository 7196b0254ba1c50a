use crate::error::Result;
use crate::model::FolderRecord;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The folder table as persisted: record id to record.
pub type FolderTable = BTreeMap<String, FolderRecord>;

/// Abstract interface for raw folder table I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while FolderStore handles the "what" (validation, subtree deletion, events).
pub trait StorageBackend {
    /// Load the whole folder table.
    /// A backend with nothing stored yet returns an empty table.
    fn load_records(&self) -> Result<FolderTable>;

    /// Replace the persisted folder table.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_records(&self, records: &FolderTable) -> Result<()>;

    /// Where the table lives. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
