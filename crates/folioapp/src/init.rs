//! # Data Directory and Context
//!
//! The CLI keeps everything for one workspace in a single data directory:
//!
//! ```text
//! <data dir>/
//! ├── folders.json       # organize tree
//! ├── global-state.json  # tab views meta (all windows)
//! └── folio.toml         # optional config
//! ```
//!
//! ## Resolution
//!
//! 1. An explicit `data_override` (the CLI's `--data`) wins.
//! 2. Otherwise `FOLIO_DATA` if set (primarily used by tests to isolate state).
//! 3. Otherwise the OS data directory from the `directories` crate.
//!
//! [`initialize`] loads config, opens both stores and makes sure the
//! configured workbench exists in the persisted document before handing out a
//! [`Workbench`] for it.

use crate::config::{FolioConfig, CONFIG_FILE};
use crate::error::{FolioError, Result};
use crate::organize::OrganizeService;
use crate::store::fs::FileFolderStore;
use crate::store::fs_backend::FsBackend;
use crate::store::StorageBackend;
use crate::workbench::{DesktopWorkbenchState, FsGlobalState, TabViewsMetaState, Workbench};
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub type DesktopWorkbench = Workbench<DesktopWorkbenchState<FsGlobalState>>;

pub struct FolioContext {
    pub organize: OrganizeService<FsBackend>,
    pub workbench: DesktopWorkbench,
    pub config: FolioConfig,
    pub data_dir: PathBuf,
}

/// Picks the data directory, see the module docs for precedence.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Ok(path) = std::env::var("FOLIO_DATA") {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "folio", "folio")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FolioError::Store("Could not determine data directory".to_string()))
}

pub fn load_config(data_dir: &Path) -> FolioConfig {
    let mut search_paths = Vec::new();
    if let Some(dirs) = ProjectDirs::from("com", "folio", "folio") {
        search_paths.push(SearchPath::Path(dirs.config_dir().to_path_buf()));
    }
    search_paths.push(SearchPath::Path(data_dir.to_path_buf()));

    Clapfig::builder::<FolioConfig>()
        .app_name("folio")
        .file_name(CONFIG_FILE)
        .search_paths(search_paths)
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default()
}

/// Opens the stores under the data directory and loads the configured workbench.
///
/// `tab_view_key` overrides the configured key when given.
pub fn initialize(data_override: Option<PathBuf>, tab_view_key: Option<String>) -> Result<FolioContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = load_config(&data_dir);
    let key = tab_view_key.unwrap_or_else(|| config.tab_view_key.clone());
    tracing::debug!(data_dir = %data_dir.display(), key = %key, "initializing folio");

    let organize = OrganizeService::new(FileFolderStore::open(data_dir.clone()));
    tracing::debug!(folders = %organize.store().backend().location().display(), "opened folder store");

    let tab_views = TabViewsMetaState::new(FsGlobalState::new(data_dir.clone()));
    let state = DesktopWorkbenchState::new(tab_views, key);
    if state.ensure_workbench(&config.basename())? {
        tracing::debug!(key = state.tab_view_key(), "created persisted workbench");
    }
    let workbench = Workbench::new(state)?;

    Ok(FolioContext {
        organize,
        workbench,
        config,
        data_dir,
    })
}
