use super::position::{OpenOptions, WorkbenchPosition};
use super::state::WorkbenchStateProvider;
use super::view::{View, DEFAULT_VIEW_SIZE};
use crate::error::Result;
use crate::model::{ViewMeta, ViewPath};
use std::collections::HashMap;
use uuid::Uuid;

/// Smallest share of the total size a pane may be resized down to.
pub const MIN_VIEW_SIZE_RATIO: f64 = 0.2;

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// The set of open views in one window and which of them is active.
///
/// Invariants held after every public call: there is at least one view and
/// `active_view_index() < views().len()`.
pub struct Workbench<P: WorkbenchStateProvider> {
    provider: P,
    views: Vec<View>,
    active_index: usize,
    sidebar_open: bool,
}

impl<P: WorkbenchStateProvider> Workbench<P> {
    pub fn new(provider: P) -> Result<Self> {
        let mut workbench = Self {
            provider,
            views: Vec::new(),
            active_index: 0,
            sidebar_open: false,
        };
        workbench.refresh()?;
        Ok(workbench)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Direct provider access for state the workbench does not cache.
    /// Call [`refresh`](Self::refresh) after changing views through it.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Rebuilds the view list from the provider.
    ///
    /// Views are matched by id and reused, keeping their history and size.
    /// A reused view whose stored path differs from its current location gets
    /// its current history entry replaced. An empty list is repaired with a
    /// fresh view, and an out-of-range active index is clamped; both repairs
    /// are written back.
    pub fn refresh(&mut self) -> Result<()> {
        let metas = self.provider.views()?;
        let mut old: HashMap<String, View> = self
            .views
            .drain(..)
            .map(|view| (view.id().to_string(), view))
            .collect();

        let mut views: Vec<View> = metas
            .into_iter()
            .map(|meta| match old.remove(&meta.id) {
                Some(mut view) => {
                    if let Some(path) = meta.path {
                        if view.location() != &path {
                            view.history_mut().replace(path);
                        }
                    }
                    if meta.title.is_some() {
                        view.set_title(meta.title);
                    }
                    view
                }
                None => {
                    let mut view = View::new(meta.id, meta.path);
                    view.set_title(meta.title);
                    view
                }
            })
            .collect();

        let mut repaired = false;
        if views.is_empty() {
            tracing::debug!("workbench has no views, opening a blank one");
            views.push(View::new(Uuid::new_v4().to_string(), None));
            repaired = true;
        }
        self.views = views;

        let stored = self.provider.active_view_index()?;
        self.active_index = self.clamp_index(stored);
        if self.active_index != stored {
            tracing::warn!(stored, clamped = self.active_index, "active view index out of range");
            repaired = true;
        }

        if repaired {
            self.persist()?;
        }
        Ok(())
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn view(&self, id: &str) -> Option<&View> {
        self.views.iter().find(|v| v.id() == id)
    }

    pub fn view_index(&self, id: &str) -> Option<usize> {
        self.views.iter().position(|v| v.id() == id)
    }

    pub fn active_view_index(&self) -> usize {
        self.active_index
    }

    pub fn active_view(&self) -> &View {
        &self.views[self.active_index]
    }

    fn active_view_mut(&mut self) -> &mut View {
        &mut self.views[self.active_index]
    }

    /// Location of the active view.
    pub fn location(&self) -> &ViewPath {
        self.active_view().location()
    }

    pub fn basename(&self) -> Result<String> {
        self.provider.basename()
    }

    pub fn set_basename(&mut self, basename: &str) -> Result<()> {
        self.provider.set_basename(basename)
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Activates the view at `index`, clamped into range.
    pub fn active(&mut self, index: usize) -> Result<()> {
        self.active_index = self.clamp_index(index);
        self.provider.set_active_view_index(self.active_index)
    }

    /// Inserts a new view at `at` and activates it. Returns its index.
    pub fn create_view(
        &mut self,
        at: WorkbenchPosition,
        default_location: ViewPath,
        id: Option<String>,
    ) -> Result<usize> {
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let index = self.index_at(at).min(self.views.len());
        tracing::debug!(%id, index, location = %default_location, "creating view");

        self.views.insert(index, View::new(id, Some(default_location)));
        self.active_index = index;
        self.persist()?;
        Ok(index)
    }

    /// Navigates the view at `options.at`, creating one there if none exists.
    pub fn open(&mut self, to: impl Into<ViewPath>, options: OpenOptions) -> Result<()> {
        let to = to.into();
        match self.resolve(options.at) {
            Some(index) => {
                let history = self.views[index].history_mut();
                if options.replace_history {
                    history.replace(to);
                } else {
                    history.push(to);
                }
                self.persist_views()
            }
            None => {
                self.create_view(options.at, to, None)?;
                Ok(())
            }
        }
    }

    pub fn open_doc(&mut self, doc_id: &str, block_id: Option<&str>, options: OpenOptions) -> Result<()> {
        let to = match block_id {
            Some(block_id) => format!("/{}#{}", doc_id, block_id),
            None => format!("/{}", doc_id),
        };
        self.open(to.as_str(), options)
    }

    pub fn open_collections(&mut self, options: OpenOptions) -> Result<()> {
        self.open("/collection", options)
    }

    pub fn open_collection(&mut self, collection_id: &str, options: OpenOptions) -> Result<()> {
        self.open(format!("/collection/{}", collection_id).as_str(), options)
    }

    pub fn open_all(&mut self, options: OpenOptions) -> Result<()> {
        self.open("/all", options)
    }

    pub fn open_trash(&mut self, options: OpenOptions) -> Result<()> {
        self.open("/trash", options)
    }

    pub fn open_tags(&mut self, options: OpenOptions) -> Result<()> {
        self.open("/tag", options)
    }

    pub fn open_tag(&mut self, tag_id: &str, options: OpenOptions) -> Result<()> {
        self.open(format!("/tag/{}", tag_id).as_str(), options)
    }

    /// Steps the active view back in its history. Returns false at the oldest entry.
    pub fn go_back(&mut self) -> Result<bool> {
        let moved = self.active_view_mut().history_mut().back();
        if moved {
            self.persist_views()?;
        }
        Ok(moved)
    }

    pub fn go_forward(&mut self) -> Result<bool> {
        let moved = self.active_view_mut().history_mut().forward();
        if moved {
            self.persist_views()?;
        }
        Ok(moved)
    }

    pub fn view_at(&self, position: WorkbenchPosition) -> Option<&View> {
        self.views.get(self.index_at(position))
    }

    /// Closes a view. The last remaining view and unknown ids are left alone.
    pub fn close(&mut self, view_id: &str) -> Result<()> {
        if self.views.len() == 1 {
            return Ok(());
        }
        let Some(index) = self.view_index(view_id) else {
            return Ok(());
        };

        self.views.remove(index);
        if self.active_index != 0 && self.active_index >= index {
            self.active_index -= 1;
        }
        tracing::debug!(id = view_id, index, active = self.active_index, "closed view");
        self.persist()
    }

    /// Keeps only `view_id`, restored to full size and active.
    pub fn close_others(&mut self, view_id: &str) -> Result<()> {
        let Some(index) = self.view_index(view_id) else {
            return Ok(());
        };
        let mut view = self.views.swap_remove(index);
        view.set_size(DEFAULT_VIEW_SIZE);
        self.views = vec![view];
        self.active_index = 0;
        self.persist()
    }

    /// Swaps the views at `from` and `to` (both clamped) and activates `to`.
    pub fn move_view(&mut self, from: usize, to: usize) -> Result<()> {
        let from = self.clamp_index(from);
        let to = self.clamp_index(to);
        if from == to {
            return Ok(());
        }
        self.views.swap(from, to);
        self.active_index = to;
        self.persist()
    }

    /// Moves the border between view `index` and the next one by `percent`
    /// of the total size (from -1 to 1).
    ///
    /// Returns false without changing anything when `percent` is not finite,
    /// there is no next view, or either pane would drop below
    /// [`MIN_VIEW_SIZE_RATIO`] of the total.
    pub fn resize(&mut self, index: usize, percent: f64) -> bool {
        if !percent.is_finite() || index >= self.views.len().saturating_sub(1) {
            return false;
        }
        let total: f64 = self.views.iter().map(View::size).sum();
        let delta = total * percent;
        let new_size = round4(self.views[index].size() + delta);
        let new_next_size = round4(self.views[index + 1].size() - delta);

        let fits = new_size / total >= MIN_VIEW_SIZE_RATIO
            && new_next_size / total >= MIN_VIEW_SIZE_RATIO;
        if !fits {
            return false;
        }
        self.views[index].set_size(new_size);
        self.views[index + 1].set_size(new_next_size);
        true
    }

    pub fn view_metas(&self) -> Vec<ViewMeta> {
        self.views.iter().map(View::meta).collect()
    }

    fn index_at(&self, position: WorkbenchPosition) -> usize {
        match position {
            WorkbenchPosition::Active => self.active_index,
            WorkbenchPosition::Beside => self.active_index + 1,
            WorkbenchPosition::Head => 0,
            WorkbenchPosition::Tail => self.views.len(),
            WorkbenchPosition::Index(index) => index,
        }
    }

    fn resolve(&self, position: WorkbenchPosition) -> Option<usize> {
        let index = self.index_at(position);
        (index < self.views.len()).then_some(index)
    }

    fn clamp_index(&self, index: usize) -> usize {
        index.min(self.views.len().saturating_sub(1))
    }

    fn persist_views(&mut self) -> Result<()> {
        let metas = self.view_metas();
        self.provider.set_views(metas)
    }

    fn persist(&mut self) -> Result<()> {
        self.persist_views()?;
        self.provider.set_active_view_index(self.active_index)
    }
}
