//! # Workbench
//!
//! The workbench arranges open views side by side. Each view is a pane with
//! its own navigation history; exactly one view is active at a time.
//!
//! ## Pieces
//!
//! - [`View`]: id, history ([`History`]) and relative pane size.
//! - [`Workbench`]: the ordered view list plus the active index. Resolves
//!   [`WorkbenchPosition`]s, opens routes, closes, reorders and resizes views.
//! - [`WorkbenchStateProvider`]: where the view list is kept.
//!   [`InMemoryWorkbenchState`] for a single session,
//!   [`DesktopWorkbenchState`] for one window's entry in the persisted
//!   [`TabViewsMeta`] document.
//!
//! ## Invariants
//!
//! - The view list is never empty.
//! - The active index always points at an existing view.
//! - After a resize every pane holds at least [`MIN_VIEW_SIZE_RATIO`] of the
//!   total size.
//!
//! ## Reconciliation
//!
//! [`Workbench::refresh`] rebuilds the list from the provider's view metadata.
//! Views are matched by id so a re-ordered or re-read list keeps each view's
//! history and size. Only when the stored path differs from where a view
//! currently is does the view's current history entry get replaced.

mod entity;
mod position;
pub mod state;
pub mod tab_views;
mod view;

pub use entity::{Workbench, MIN_VIEW_SIZE_RATIO};
pub use position::{OpenOptions, WorkbenchPosition};
pub use state::{DesktopWorkbenchState, InMemoryWorkbenchState, WorkbenchStateProvider};
pub use tab_views::{
    FsGlobalState, GlobalState, MemGlobalState, TabViewsMeta, TabViewsMetaState, WorkbenchMeta,
};
pub use view::{History, View, DEFAULT_VIEW_SIZE};
