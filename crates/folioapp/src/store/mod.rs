//! # Storage Layer
//!
//! The organize tree lives in a single table of [`FolderRecord`]s keyed by id.
//! Storage is split the same way on both sides of the [`StorageBackend`] trait:
//!
//! - **Backend** ([`backend::StorageBackend`]): the "how". Loads and saves the
//!   whole table. [`mem_backend::MemBackend`] keeps it in memory,
//!   [`fs_backend::FsBackend`] in `folders.json`.
//! - **Store** ([`folder_store::FolderStore`]): the "what". Validates parents,
//!   assigns ids and sort keys, deletes subtrees and notifies subscribers.
//!
//! ## Change Notification
//!
//! Every successful mutation emits a [`FolderEvent`] to subscribers before the
//! call returns. Readers never cache records, so anything derived from the
//! store (see [`crate::organize::Node`]) observes the change on its next read.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! └── folders.json    # { "<id>": FolderRecord, ... }
//! ```
//!
//! ## Implementations
//!
//! - [`memory::InMemoryFolderStore`]: for tests.
//! - [`fs::FileFolderStore`]: production store used by the CLI.

use crate::model::FolderRecord;

pub mod backend;
pub mod folder_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

pub use backend::StorageBackend;
pub use folder_store::{FolderStore, SubscriptionId};

/// A change applied to the folder table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderEvent {
    Created(FolderRecord),
    Updated(FolderRecord),
    /// Ids of every record removed by one operation, parents before children.
    Removed(Vec<String>),
}
