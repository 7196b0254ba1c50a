//! # Folio Architecture
//!
//! Folio holds the **view state** of a note-taking application: the organize
//! tree shown in the sidebar and the workbench that arranges open views into
//! tabs and split panes. It is a library first; the `folio` binary is just one
//! client driving it from a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Entities (organize::Node, workbench::Workbench)            │
//! │  - Derived state (type, name, children, active view)        │
//! │  - Validate input before touching storage                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Stores / Providers (store::FolderStore,                    │
//! │                      workbench::WorkbenchStateProvider)     │
//! │  - Record-level CRUD and change notification                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Backends (store::StorageBackend, workbench::GlobalState)   │
//! │  - In memory for tests, JSON files for the CLI              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is single-threaded: mutations happen synchronously and every
//! derived accessor reads through to the store, so a change is visible on the
//! very next read. Shared ownership between entities and stores uses `Rc`.
//!
//! ## Module Overview
//!
//! - [`model`]: folder records, view paths and view metadata
//! - [`store`]: the folder record store and its backends
//! - [`organize`]: tree nodes and the organize service
//! - [`workbench`]: views, the workbench entity and its persisted state
//! - [`config`]: layered configuration
//! - [`init`]: data directory resolution and context wiring
//! - [`error`]: the crate error type

pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod organize;
pub mod store;
pub mod workbench;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
