use super::backend::{FolderTable, StorageBackend};
use crate::error::{FolioError, Result};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since folio is single-threaded,
/// which lets the `StorageBackend` trait take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<FolderTable>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl StorageBackend for MemBackend {
    fn load_records(&self) -> Result<FolderTable> {
        Ok(self.records.borrow().clone())
    }

    fn save_records(&self, records: &FolderTable) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(FolioError::Store("Simulated write error".to_string()));
        }
        *self.records.borrow_mut() = records.clone();
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://folders")
    }
}
