use super::tab_views::{GlobalState, TabViewsMetaState, WorkbenchMeta};
use crate::error::Result;
use crate::model::ViewMeta;
use uuid::Uuid;

pub const DEFAULT_BASENAME: &str = "/";

/// Where a [`super::Workbench`] reads and writes its view list.
///
/// The workbench treats the provider as the source of truth: it rebuilds its
/// views from [`views`](Self::views) on refresh and writes every structural
/// change back through the setters.
pub trait WorkbenchStateProvider {
    fn basename(&self) -> Result<String>;
    fn set_basename(&mut self, basename: &str) -> Result<()>;

    fn views(&self) -> Result<Vec<ViewMeta>>;
    fn set_views(&mut self, views: Vec<ViewMeta>) -> Result<()>;

    fn active_view_index(&self) -> Result<usize>;
    fn set_active_view_index(&mut self, index: usize) -> Result<()>;
}

/// State that lives as long as the process; starts with a single blank view.
#[derive(Debug, Clone)]
pub struct InMemoryWorkbenchState {
    basename: String,
    views: Vec<ViewMeta>,
    active_view_index: usize,
}

impl Default for InMemoryWorkbenchState {
    fn default() -> Self {
        Self {
            basename: DEFAULT_BASENAME.to_string(),
            views: vec![ViewMeta::new(Uuid::new_v4().to_string())],
            active_view_index: 0,
        }
    }
}

impl InMemoryWorkbenchState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkbenchStateProvider for InMemoryWorkbenchState {
    fn basename(&self) -> Result<String> {
        Ok(self.basename.clone())
    }

    fn set_basename(&mut self, basename: &str) -> Result<()> {
        self.basename = basename.to_string();
        Ok(())
    }

    fn views(&self) -> Result<Vec<ViewMeta>> {
        Ok(self.views.clone())
    }

    fn set_views(&mut self, views: Vec<ViewMeta>) -> Result<()> {
        self.views = views;
        Ok(())
    }

    fn active_view_index(&self) -> Result<usize> {
        Ok(self.active_view_index)
    }

    fn set_active_view_index(&mut self, index: usize) -> Result<()> {
        self.active_view_index = index;
        Ok(())
    }
}

/// One window's slice of the persisted tab views document.
///
/// Reads fall back to an empty workbench when no entry matches the key.
/// Writes only touch an existing entry; call
/// [`ensure_workbench`](Self::ensure_workbench) first to create it.
pub struct DesktopWorkbenchState<G: GlobalState> {
    tab_views_meta: TabViewsMetaState<G>,
    tab_view_key: String,
}

impl<G: GlobalState> DesktopWorkbenchState<G> {
    pub fn new(tab_views_meta: TabViewsMetaState<G>, tab_view_key: impl Into<String>) -> Self {
        Self {
            tab_views_meta,
            tab_view_key: tab_view_key.into(),
        }
    }

    pub fn tab_view_key(&self) -> &str {
        &self.tab_view_key
    }

    pub fn tab_views_meta(&self) -> &TabViewsMetaState<G> {
        &self.tab_views_meta
    }

    pub fn workbench_meta(&self) -> Result<Option<WorkbenchMeta>> {
        Ok(self
            .tab_views_meta
            .value()?
            .workbench(&self.tab_view_key)
            .cloned())
    }

    /// Replaces this window's entry, leaving the others untouched.
    pub fn set_workbench_meta(&self, meta: WorkbenchMeta) -> Result<()> {
        let key = self.tab_view_key.clone();
        self.tab_views_meta.patch(move |value| {
            for workbench in value.workbenches.iter_mut() {
                if workbench.key == key {
                    *workbench = meta.clone();
                }
            }
        })
    }

    fn patch_workbench_meta<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut WorkbenchMeta),
    {
        match self.workbench_meta()? {
            Some(mut meta) => {
                f(&mut meta);
                self.set_workbench_meta(meta)
            }
            None => {
                tracing::debug!(key = %self.tab_view_key, "no persisted workbench for key, write dropped");
                Ok(())
            }
        }
    }

    /// Creates an empty entry for this window if there is none.
    /// Returns true when an entry was created.
    pub fn ensure_workbench(&self, basename: &str) -> Result<bool> {
        if self.workbench_meta()?.is_some() {
            return Ok(false);
        }
        let meta = WorkbenchMeta::new(self.tab_view_key.clone(), basename);
        let key = self.tab_view_key.clone();
        self.tab_views_meta.patch(move |value| {
            value.workbenches.push(meta);
            if value.active_workbench_key.is_none() {
                value.active_workbench_key = Some(key);
            }
        })?;
        Ok(true)
    }

    pub fn pinned(&self) -> Result<bool> {
        Ok(self
            .workbench_meta()?
            .and_then(|meta| meta.pinned)
            .unwrap_or(false))
    }

    pub fn set_pinned(&mut self, pinned: bool) -> Result<()> {
        self.patch_workbench_meta(|meta| meta.pinned = Some(pinned))
    }
}

impl<G: GlobalState> WorkbenchStateProvider for DesktopWorkbenchState<G> {
    fn basename(&self) -> Result<String> {
        Ok(self
            .workbench_meta()?
            .map(|meta| meta.basename)
            .unwrap_or_else(|| DEFAULT_BASENAME.to_string()))
    }

    fn set_basename(&mut self, basename: &str) -> Result<()> {
        self.patch_workbench_meta(|meta| meta.basename = basename.to_string())
    }

    fn views(&self) -> Result<Vec<ViewMeta>> {
        Ok(self
            .workbench_meta()?
            .map(|meta| meta.views)
            .unwrap_or_default())
    }

    fn set_views(&mut self, views: Vec<ViewMeta>) -> Result<()> {
        self.patch_workbench_meta(|meta| meta.views = views)
    }

    fn active_view_index(&self) -> Result<usize> {
        Ok(self
            .workbench_meta()?
            .map(|meta| meta.active_view_index)
            .unwrap_or(0))
    }

    fn set_active_view_index(&mut self, index: usize) -> Result<()> {
        self.patch_workbench_meta(|meta| meta.active_view_index = index)
    }
}
