//! Persisted tab view metadata.
//!
//! Every window (or tab instance) owns one [`WorkbenchMeta`], identified by its
//! key. All of them live in a single [`TabViewsMeta`] document stored under
//! [`TAB_VIEWS_META_KEY`] in a [`GlobalState`] key-value store:
//!
//! ```json
//! {
//!   "activeWorkbenchKey": "main",
//!   "workbenches": [
//!     {
//!       "key": "main",
//!       "activeViewIndex": 0,
//!       "pinned": false,
//!       "basename": "/workspace/w1",
//!       "views": [{ "id": "v1", "path": { "pathname": "/all", "search": "", "hash": "" } }]
//!     }
//!   ]
//! }
//! ```
//!
//! There is no version field and writes are last-write-wins.

use crate::error::{FolioError, Result};
use crate::model::ViewMeta;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const TAB_VIEWS_META_KEY: &str = "tabViewsMetaSchema";
pub const GLOBAL_STATE_FILE: &str = "global-state.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabViewsMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_workbench_key: Option<String>,
    #[serde(default)]
    pub workbenches: Vec<WorkbenchMeta>,
}

impl TabViewsMeta {
    /// Parses a stored value; absent or `null` yields the empty document.
    pub fn parse(value: Option<Value>) -> Result<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => serde_json::from_value(value).map_err(FolioError::Serialization),
        }
    }

    pub fn workbench(&self, key: &str) -> Option<&WorkbenchMeta> {
        self.workbenches.iter().find(|w| w.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbenchMeta {
    pub key: String,
    pub active_view_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    pub basename: String,
    pub views: Vec<ViewMeta>,
}

impl WorkbenchMeta {
    pub fn new(key: impl Into<String>, basename: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            active_view_index: 0,
            pinned: None,
            basename: basename.into(),
            views: Vec::new(),
        }
    }
}

/// Application-wide key-value state, shared by every window.
pub trait GlobalState {
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Global state held in memory, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemGlobalState {
    values: RefCell<Map<String, Value>>,
}

impl MemGlobalState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GlobalState for MemGlobalState {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

/// Global state persisted as one JSON object in `global-state.json`.
pub struct FsGlobalState {
    root: PathBuf,
}

impl FsGlobalState {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(GLOBAL_STATE_FILE)
    }

    fn load(&self) -> Result<Map<String, Value>> {
        let path = self.path();
        if !path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&path).map_err(FolioError::Io)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&content).map_err(FolioError::Serialization)
    }

    fn save(&self, values: &Map<String, Value>) -> Result<()> {
        ensure_dir(&self.root)?;
        let content = serde_json::to_string_pretty(values).map_err(FolioError::Serialization)?;

        // Atomic write
        let tmp_file = self.root.join(format!(".global-state-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_file, content)
            .and_then(|_| fs::rename(&tmp_file, self.path()))
        {
            let _ = fs::remove_file(&tmp_file);
            return Err(FolioError::Io(e));
        }
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(FolioError::Io)?;
    }
    Ok(())
}

impl GlobalState for FsGlobalState {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value);
        self.save(&values)
    }
}

/// Typed access to the tab views document inside a [`GlobalState`].
pub struct TabViewsMetaState<G: GlobalState> {
    global_state: G,
}

impl<G: GlobalState> TabViewsMetaState<G> {
    pub fn new(global_state: G) -> Self {
        Self { global_state }
    }

    pub fn global_state(&self) -> &G {
        &self.global_state
    }

    pub fn value(&self) -> Result<TabViewsMeta> {
        TabViewsMeta::parse(self.global_state.get(TAB_VIEWS_META_KEY)?)
    }

    pub fn set_value(&self, value: &TabViewsMeta) -> Result<()> {
        let value = serde_json::to_value(value).map_err(FolioError::Serialization)?;
        self.global_state.set(TAB_VIEWS_META_KEY, value)
    }

    /// Read-modify-write of the whole document.
    pub fn patch<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut TabViewsMeta),
    {
        let mut value = self.value()?;
        f(&mut value);
        self.set_value(&value)
    }
}
